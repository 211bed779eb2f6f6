//! Rotation and movement logic with kick application.

use crate::collision::can_place;
use crate::kicks::get_kicks;
use tetrad_core::{Board, Movement, PieceState};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: PieceState,
    /// 0 when the plain rotation fit, otherwise 1-based kick attempt.
    pub kick_index: usize,
}

/// Try to rotate a piece, applying kicks if necessary.
/// Returns None if rotation is not possible.
pub fn try_rotate(board: &Board, piece: &PieceState, clockwise: bool) -> Option<RotationResult> {
    let rotated = piece.rotated(clockwise);
    if can_place(board, &rotated) {
        return Some(RotationResult {
            piece: rotated,
            kick_index: 0,
        });
    }

    let kicks = get_kicks(piece.kind(), piece.rotation(), clockwise);
    for (i, &(dx, dy)) in kicks.iter().enumerate() {
        let kicked = rotated.translated(dx, dy);
        if can_place(board, &kicked) {
            return Some(RotationResult {
                piece: kicked,
                kick_index: i + 1, // +1 because index 0 is no-kick
            });
        }
    }

    None
}

/// Rotate in place against the board.
/// On failure the piece is left exactly as it was. Returns whether the rotation state changed.
pub fn rotate_with_kicks(board: &Board, piece: &mut PieceState, clockwise: bool) -> bool {
    match try_rotate(board, piece, clockwise) {
        Some(result) => {
            let changed = result.piece.rotation() != piece.rotation();
            *piece = result.piece;
            changed
        }
        None => false,
    }
}

fn shift(board: &Board, piece: &PieceState, (dx, dy): (i8, i8)) -> Option<PieceState> {
    let moved = piece.translated(dx, dy);
    can_place(board, &moved).then_some(moved)
}

/// Try to move piece down one row (soft drop)
pub fn try_drop(board: &Board, piece: &PieceState) -> Option<PieceState> {
    successor(board, piece, Movement::Down)
}

/// Position after applying one movement primitive, if unobstructed.
pub fn successor(board: &Board, piece: &PieceState, movement: Movement) -> Option<PieceState> {
    match movement.offset() {
        Some(offset) => shift(board, piece, offset),
        None => try_rotate(board, piece, movement == Movement::RotateCw).map(|r| r.piece),
    }
}

/// A piece is locked when one more row down would collide.
#[inline]
pub fn is_locked(board: &Board, piece: &PieceState) -> bool {
    try_drop(board, piece).is_none()
}
