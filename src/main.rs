use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use torus_life::config::Config;
use torus_life::render::TerminalRenderer;
use torus_life::simulation::StopSignal;

fn init_tracing() {
    // frames go to stdout, so logs must stay on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing();

    let mut rng = config.rng();
    let mut sim = config
        .build(&mut rng)
        .context("Failed to set up the simulation")?;

    let stop = StopSignal::new();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.raise()).context("Failed to install Ctrl-C handler")?;
    }

    let mut renderer =
        TerminalRenderer::new(io::stdout().lock()).context("Failed to take over the terminal")?;

    let res = sim.run(config.generations, config.delay(), &mut renderer, &stop);

    // give the cursor back even if drawing failed
    renderer
        .finish(config.height)
        .context("Failed to restore the terminal")?;

    let summary = res.context("Failed to draw to the terminal")?;

    info!(?summary, "done");

    Ok(())
}
