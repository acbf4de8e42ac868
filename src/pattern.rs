use std::borrow::Cow;

use tracing::trace;

use crate::error::PatternError;
use crate::grid::Grid;

/// A small matrix of cells that can be stamped onto a [`Grid`].
///
/// Entries are `0` (dead) or `1` (alive); any non-zero entry counts as alive. Rows may have
/// different lengths, each row is stamped up to its own length.
///
/// Stamping overwrites: a `0` entry kills whatever cell lies underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: Option<Cow<'static, str>>,
    shape: Vec<Vec<u8>>,
}

impl Pattern {
    pub fn new(shape: Vec<Vec<u8>>) -> Self {
        Self { name: None, shape }
    }

    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// ```notrust
    /// . O .
    /// . . O
    /// O O O
    /// ```
    pub fn glider() -> Self {
        Self::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]).with_name("glider")
    }

    /// ```notrust
    /// O O
    /// O O
    /// ```
    pub fn block() -> Self {
        Self::new(vec![vec![1, 1], vec![1, 1]]).with_name("block")
    }

    /// Period 2 oscillator, horizontal phase.
    ///
    /// ```notrust
    /// . . .
    /// O O O
    /// . . .
    /// ```
    pub fn blinker() -> Self {
        Self::new(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]).with_name("blinker")
    }

    /// The shape seeded next to the glider and block by default.
    ///
    /// ```notrust
    /// O . O
    /// . O .
    /// . O .
    /// ```
    pub fn custom_demo() -> Self {
        Self::new(vec![vec![1, 0, 1], vec![0, 1, 0], vec![0, 1, 0]]).with_name("custom")
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn shape(&self) -> &[Vec<u8>] {
        &self.shape
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.shape.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.shape.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the pattern has no entries, i.e. stamping it writes nothing
    pub fn is_empty(&self) -> bool {
        self.shape.iter().all(Vec::is_empty)
    }

    /// Stamp the pattern so that its top left entry lands on `(anchor_row, anchor_col)`.
    ///
    /// Coordinates wrap around the edges of the grid, so a pattern stamped near an edge
    /// continues on the opposite side. Anchors past the grid size wrap as well.
    ///
    /// An empty pattern writes nothing on any grid. A non-empty pattern cannot be stamped on a
    /// grid with no rows or no columns, in which case nothing is written.
    pub fn apply(
        &self,
        grid: &mut Grid,
        anchor_row: usize,
        anchor_col: usize,
    ) -> Result<(), PatternError> {
        if self.is_empty() {
            return Ok(());
        }

        let (h, w) = (grid.height(), grid.width());
        if grid.is_empty() {
            return Err(PatternError::EmptyGrid {
                height: h,
                width: w,
            });
        }

        // reduce the anchor first so the sums below cannot overflow
        let (anchor_row, anchor_col) = (anchor_row % h, anchor_col % w);

        for (i, row) in self.shape.iter().enumerate() {
            let r = (anchor_row + i % h) % h;

            for (j, &v) in row.iter().enumerate() {
                let c = (anchor_col + j % w) % w;
                grid.set_cell(r, c, v != 0);
            }
        }

        trace!(
            name = self.name(),
            anchor_row,
            anchor_col,
            "stamped {}x{} pattern",
            self.height(),
            self.width()
        );

        Ok(())
    }
}
