use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is outside of a {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("A {height}x{width} grid is too large to allocate")]
    TooLarge { height: usize, width: usize },

    #[error("Fraction of live cells must lie in [0, 1], got {0}")]
    InvalidFraction(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Cannot stamp a non-empty pattern onto a {height}x{width} grid")]
    EmptyGrid { height: usize, width: usize },
}

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
}
