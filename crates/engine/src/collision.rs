//! collision detection - walls, floor, other blocks

use tetrad_core::{Board, PieceState};

/// does piece collide with anything?
#[inline(always)]
pub fn collides(board: &Board, piece: &PieceState) -> bool {
    !board.is_unobstructed(piece.cells())
}

/// can we place here? (just !collides)
#[inline(always)]
pub fn can_place(board: &Board, piece: &PieceState) -> bool {
    board.is_unobstructed(piece.cells())
}

/// Resting position reached by dropping straight down.
#[inline]
pub fn hard_drop(board: &Board, piece: &PieceState) -> PieceState {
    let mut landing = *piece;
    loop {
        let below = landing.translated(0, -1);
        if collides(board, &below) {
            return landing;
        }
        landing = below;
    }
}
