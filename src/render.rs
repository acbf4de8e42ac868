use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

/// Rows reserved above the grid for the generation banner
pub const HEADER_ROWS: u16 = 1;

/// Consumer of the draw instructions produced by a
/// [`Simulation`](crate::simulation::Simulation).
///
/// Coordinates are grid coordinates: `x` is the column and `y` the row.
pub trait Renderer {
    /// Wipe everything. Issued once before a run starts.
    fn clear(&mut self) -> io::Result<()>;

    /// Draw `glyph` at column `x` and row `y`
    fn draw_cell(&mut self, x: usize, y: usize, glyph: char) -> io::Result<()>;

    /// Show the current generation counter
    fn draw_generation(&mut self, generation: u64) -> io::Result<()>;

    /// Called once a frame is complete
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Draws onto an ANSI terminal through crossterm.
///
/// Commands are queued and only written out on [`Renderer::present`]. The generation banner
/// lives on the first row, the grid is drawn below it.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    /// Take over `out`, hiding the cursor until [`TerminalRenderer::finish`] is called.
    pub fn new(mut out: W) -> io::Result<Self> {
        queue!(out, cursor::Hide)?;

        Ok(Self { out })
    }

    /// Move below a grid of `rows` rows, show the cursor again and hand back the writer.
    pub fn finish(mut self, rows: usize) -> io::Result<W> {
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);

        queue!(
            self.out,
            cursor::MoveTo(0, rows.saturating_add(HEADER_ROWS)),
            cursor::Show
        )?;
        self.out.flush()?;

        Ok(self.out)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn draw_cell(&mut self, x: usize, y: usize, glyph: char) -> io::Result<()> {
        let (x, y) = (to_terminal(x)?, to_terminal(y)?);

        queue!(
            self.out,
            cursor::MoveTo(x, y.saturating_add(HEADER_ROWS)),
            style::Print(glyph)
        )
    }

    fn draw_generation(&mut self, generation: u64) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(format!("Generation: {generation}"))
        )
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Terminal positions are `u16`, anything larger cannot be shown
fn to_terminal(n: usize) -> io::Result<u16> {
    u16::try_from(n).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("position {n} does not fit on a terminal"),
        )
    })
}

/// A single instruction received by a [`Recorder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    Cell { x: usize, y: usize, glyph: char },
    Generation(u64),
}

/// Keeps every instruction it receives, for headless runs and tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,

    /// Number of completed frames
    pub frames: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the recorded commands, keeping the frame count
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for Recorder {
    fn clear(&mut self) -> io::Result<()> {
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }

    fn draw_cell(&mut self, x: usize, y: usize, glyph: char) -> io::Result<()> {
        self.commands.push(DrawCommand::Cell { x, y, glyph });
        Ok(())
    }

    fn draw_generation(&mut self, generation: u64) -> io::Result<()> {
        self.commands.push(DrawCommand::Generation(generation));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}
