//! Resting placements found for the falling piece, keyed by (row, column, rotation).

use serde::{Deserialize, Serialize};
use tetrad_core::{Board, PieceState, Rotation};

use crate::node::NodeId;

/// A reachable resting placement of the falling piece.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LockPosition {
    pub node: NodeId,
    pub piece: PieceState,
    /// Movements needed to reach it from the spawn position.
    pub chain_len: u32,
    /// Best grade of any chain through this placement, if one was graded.
    pub grade: Option<f64>,
}

/// Flat `[row][column][rotation]` table keyed on the piece's anchor cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LockPositionTable {
    slots: Vec<Option<LockPosition>>,
    len: usize,
}

const SLOTS: usize = Board::HEIGHT * Board::WIDTH * 4;

fn slot(row: usize, column: usize, rotation: Rotation) -> usize {
    (row * Board::WIDTH + column) * 4 + rotation.index()
}

impl LockPositionTable {
    pub fn new() -> Self {
        Self {
            slots: vec![None; SLOTS],
            len: 0,
        }
    }

    pub(crate) fn insert(&mut self, position: LockPosition) {
        let (x, y) = position.piece.anchor();
        let entry = &mut self.slots[slot(y as usize, x as usize, position.piece.rotation())];
        if entry.is_none() {
            self.len += 1;
        }
        *entry = Some(position);
    }

    pub(crate) fn set_grade(&mut self, piece: &PieceState, grade: f64) {
        let (x, y) = piece.anchor();
        if let Some(entry) = &mut self.slots[slot(y as usize, x as usize, piece.rotation())] {
            entry.grade = Some(grade);
        }
    }

    pub fn get(&self, row: usize, column: usize, rotation: Rotation) -> Option<&LockPosition> {
        if row >= Board::HEIGHT || column >= Board::WIDTH {
            return None;
        }
        self.slots[slot(row, column, rotation)].as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Filled entries in row, column, rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &LockPosition> {
        self.slots.iter().flatten()
    }

    /// Grade per slot, `-1.0` where nothing rests, flattened row-major as
    /// `(row * 10 + column) * 4 + rotation`. Usable as an observation vector.
    pub fn grade_grid(&self) -> Vec<f64> {
        self.slots
            .iter()
            .map(|e| e.and_then(|p| p.grade).unwrap_or(-1.0))
            .collect()
    }
}

impl Default for LockPositionTable {
    fn default() -> Self {
        Self::new()
    }
}
