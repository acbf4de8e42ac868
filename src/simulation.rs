use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use tracing::debug;
use tracing::info;
use tracing::trace;

use rand::Rng;

use crate::error::GridError;
use crate::error::PatternError;
use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::render::Renderer;
use crate::rules;

/// Flag asking a running [`Simulation::run`] to stop before its next frame.
///
/// Clones share the same flag, so one clone can be handed to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of [`Simulation::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of frames rendered and generations advanced
    pub generations_run: u64,

    /// Whether the run ended early on a [`StopSignal`]
    pub stopped: bool,
}

/// Game of Life on a toroidal [`Grid`].
pub struct Simulation {
    grid: Grid,

    /// Number of generations advanced since construction
    generation: u64,

    /// What the renderer was last told, row-major. Only used to diff frames.
    previous_frame: Vec<bool>,

    /// Scratch buffer holding the next generation before it is committed
    next: Vec<bool>,
}

impl Simulation {
    /// Create a simulation on a `height x width` grid of dead cells.
    ///
    /// Panics if `height * width` overflows. See [`Simulation::try_new`] for a checked version.
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_grid(Grid::new(height, width))
    }

    pub fn try_new(height: usize, width: usize) -> Result<Self, GridError> {
        Grid::try_new(height, width).map(Self::with_grid)
    }

    fn with_grid(grid: Grid) -> Self {
        let n = grid.height() * grid.width();

        Self {
            grid,
            generation: 0,
            previous_frame: vec![false; n],
            next: vec![false; n],
        }
    }

    /// Read-only view of the grid. Writes go through the methods below so that its size never
    /// changes.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// See [`Grid::set_cell`]
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        self.grid.set_cell(row, col, alive);
    }

    /// Stamp `pattern` with its top left entry at `(row, col)`. See [`Pattern::apply`].
    pub fn stamp(
        &mut self,
        pattern: &Pattern,
        row: usize,
        col: usize,
    ) -> Result<(), PatternError> {
        pattern.apply(&mut self.grid, row, col)
    }

    /// See [`Grid::randomize`]
    pub fn randomize<R>(&mut self, fraction_alive: f64, rng: &mut R) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        self.grid.randomize(fraction_alive, rng)
    }

    /// Kill every cell. The generation counter is left alone.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance every cell by one generation under B3/S23.
    ///
    /// The next generation is first computed in full from the current grid, then committed. No
    /// neighbour count ever sees a cell that was already updated.
    pub fn advance_generation(&mut self) {
        let (h, w) = (self.grid.height(), self.grid.width());

        // compute
        for row in 0..h {
            for col in 0..w {
                let alive = self.grid.get_cell(row, col).is_alive();
                let n = self.grid.count_live_neighbors(row, col);

                self.next[row * w + col] = rules::next_state(alive, n);
            }
        }

        // commit
        for row in 0..h {
            for col in 0..w {
                self.grid.set_cell(row, col, self.next[row * w + col]);
            }
        }

        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.grid.population(),
            "advanced"
        );
    }

    /// Send the cells that changed since the last frame to `renderer`, followed by the generation
    /// counter.
    ///
    /// The first frame draws every live cell, since every cell is assumed dead beforehand.
    pub fn render_frame<R>(&mut self, renderer: &mut R) -> io::Result<()>
    where
        R: Renderer + ?Sized,
    {
        let w = self.grid.width();
        let mut redrawn = 0usize;

        for (row, cells) in self.grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let seen = &mut self.previous_frame[row * w + col];
                let alive = cell.is_alive();

                if *seen != alive {
                    renderer.draw_cell(col, row, cell.render())?;
                    redrawn += 1;
                }

                *seen = alive;
            }
        }

        renderer.draw_generation(self.generation)?;
        renderer.present()?;

        trace!(generation = self.generation, redrawn, "rendered frame");

        Ok(())
    }

    /// Render and advance `generations` times, pausing `delay` after each advance.
    ///
    /// The screen is cleared once up front, and the grid as it stands (stamped patterns included)
    /// is drawn before anything evolves. `stop` is checked before each frame.
    pub fn run<R>(
        &mut self,
        generations: u64,
        delay: Duration,
        renderer: &mut R,
        stop: &StopSignal,
    ) -> io::Result<RunSummary>
    where
        R: Renderer + ?Sized,
    {
        info!(
            generations,
            ?delay,
            height = self.grid.height(),
            width = self.grid.width(),
            "starting run"
        );

        renderer.clear()?;

        let mut generations_run = 0;
        let mut stopped = false;

        for _ in 0..generations {
            if stop.is_raised() {
                debug!(generation = self.generation, "stop requested");
                stopped = true;
                break;
            }

            self.render_frame(renderer)?;
            self.advance_generation();
            generations_run += 1;

            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        info!(
            generations_run,
            stopped,
            population = self.grid.population(),
            "run finished"
        );

        Ok(RunSummary {
            generations_run,
            stopped,
        })
    }
}
