use std::time::Duration;

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::info;

use crate::error::SetupError;
use crate::pattern::Pattern;
use crate::simulation::Simulation;

pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_GENERATIONS: u64 = 400;
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Largest grid side accepted on the command line. Terminal positions are `u16`.
pub const MAX_DIMENSION: u64 = u16::MAX as u64;

/// Conway's Game of Life on a wrap-around grid, drawn in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of rows in the grid.
    #[arg(
        long,
        value_name = "ROWS",
        default_value_t = DEFAULT_HEIGHT,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DIMENSION)
    )]
    pub height: usize,

    /// Number of columns in the grid.
    #[arg(
        long,
        value_name = "COLUMNS",
        default_value_t = DEFAULT_WIDTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DIMENSION)
    )]
    pub width: usize,

    /// How many generations to draw before exiting.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_GENERATIONS)]
    pub generations: u64,

    /// Pause after each generation.
    #[arg(
        long = "delay-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_DELAY_MS,
        value_parser = clap::value_parser!(u64).range(0..=60_000)
    )]
    pub delay_ms: u64,

    /// Seed for the random fill. Drawn from the OS when absent.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Fill the grid at random with this fraction of live cells before stamping patterns.
    #[arg(long, value_name = "FRACTION", value_parser = parse_fraction)]
    pub fill: Option<f64>,

    /// Do not stamp the default glider, block and custom shape.
    #[arg(long)]
    pub no_patterns: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            generations: DEFAULT_GENERATIONS,
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
            fill: None,
            no_patterns: false,
        }
    }
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The random source of a run. Created once and threaded through everything that needs it.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Build the simulation described by this configuration: random fill first, if any, then
    /// the default patterns on top.
    pub fn build<R>(&self, rng: &mut R) -> Result<Simulation, SetupError>
    where
        R: Rng + ?Sized,
    {
        let mut sim = Simulation::try_new(self.height, self.width)?;

        if let Some(fraction) = self.fill {
            sim.randomize(fraction, rng)?;
        }

        if !self.no_patterns {
            for (pattern, row, col) in default_stamps() {
                debug!(name = pattern.name(), row, col, "stamping");
                sim.stamp(&pattern, row, col)?;
            }
        }

        info!(
            height = self.height,
            width = self.width,
            population = sim.grid().population(),
            "simulation ready"
        );

        Ok(sim)
    }
}

/// Patterns seeded on every run unless disabled, with their anchor `(row, col)`.
pub fn default_stamps() -> [(Pattern, usize, usize); 3] {
    [
        (Pattern::glider(), 5, 10),
        (Pattern::block(), 15, 15),
        (Pattern::custom_demo(), 10, 25),
    ]
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let f: f64 = s.parse().map_err(|_| format!("\"{s}\" is not a number"))?;

    if !(0f64..=1f64).contains(&f) {
        return Err(format!("{f} is not between 0 and 1"));
    }

    Ok(f)
}
