//! Tetrad core crate - pieces, movements and the playfield grid.

mod board;
mod board_heights;
mod moves;
mod piece;
mod state;

pub use board::Board;
pub use board_heights::ColumnHeights;
pub use moves::Movement;
pub use piece::{Color, PieceKind, Rotation};
pub use state::PieceState;
