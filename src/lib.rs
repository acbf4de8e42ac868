pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod render;
pub mod rules;
pub mod simulation;

pub use crate::grid::Grid;
pub use crate::pattern::Pattern;
pub use crate::simulation::Simulation;
