//! Reachable placement generation.

use std::collections::VecDeque;

use crate::collision::can_place;
use crate::movement::{is_locked, successor};
use tetrad_core::{Board, Movement, PieceState};

/// Per-depth record of `(column, row, rotation)` triples already reached,
/// keyed on the piece's anchor cell.
#[derive(Clone)]
pub struct VisitedSet {
    seen: [[[bool; 4]; Board::WIDTH]; Board::HEIGHT],
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            seen: [[[false; 4]; Board::WIDTH]; Board::HEIGHT],
        }
    }

    /// Mark the piece's position. Returns true if it was not seen before.
    /// The piece must be inside the playfield.
    #[inline]
    pub fn visit(&mut self, piece: &PieceState) -> bool {
        let (x, y) = piece.anchor();
        let slot = &mut self.seen[y as usize][x as usize][piece.rotation().index()];
        !std::mem::replace(slot, true)
    }
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Every distinct resting placement reachable from `start`, in BFS discovery order.
/// Returns nothing if `start` itself is obstructed.
pub fn generate_placements(board: &Board, start: &PieceState) -> Vec<PieceState> {
    let mut placements = Vec::new();
    if !can_place(board, start) {
        return placements;
    }

    let mut visited = VisitedSet::new();
    let mut queue = VecDeque::new();
    visited.visit(start);
    queue.push_back(*start);

    while let Some(piece) = queue.pop_front() {
        for movement in Movement::ALL {
            if let Some(next) = successor(board, &piece, movement) {
                if visited.visit(&next) {
                    queue.push_back(next);
                }
            }
        }
        if is_locked(board, &piece) {
            placements.push(piece);
        }
    }

    placements
}
