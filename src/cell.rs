/// Glyph drawn for a live cell.
pub const ALIVE_GLYPH: char = '█';

/// Glyph drawn for a dead cell. Drawing it over a live glyph erases it.
pub const DEAD_GLYPH: char = ' ';

/// A single cell of a [`Grid`](crate::grid::Grid).
///
/// Cells have no life of their own: they only exist as grid elements, start out dead and are
/// toggled through [`Cell::set_state`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub const fn new(alive: bool) -> Self {
        Self { alive }
    }

    pub const fn dead() -> Self {
        Self { alive: false }
    }

    pub const fn alive() -> Self {
        Self { alive: true }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_state(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Visual symbol of the cell. Pure function of its state.
    pub fn render(&self) -> char {
        if self.alive { ALIVE_GLYPH } else { DEAD_GLYPH }
    }
}
