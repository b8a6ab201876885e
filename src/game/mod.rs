//! Core 2048 logic: the grid, move directions and the board engine that
//! slides, merges, spawns and detects the end of a game.

mod direction;
mod engine;
mod grid;

pub use direction::Direction;
pub use engine::{BoardEngine, GameStatus, WIN_VALUE};
pub use grid::{Grid, DEFAULT_SIZE};
