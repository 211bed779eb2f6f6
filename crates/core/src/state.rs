//! A piece in play: kind, rotation state, occupied cells and pivot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Board, PieceKind, Rotation};

/// Value-type piece placed on the playfield.
///
/// `cells` always equals the kind's spawn shape rotated to `rotation` and
/// translated by every shift applied since spawn. The pivot is kept in
/// doubled coordinates so the I piece's half-cell centre rotates exactly.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct PieceState {
    kind: PieceKind,
    rotation: Rotation,
    cells: [(i8, i8); 4],
    pivot: (i8, i8),
}

impl PieceState {
    /// Canonical spawn position for `kind`.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            cells: kind.spawn_cells(),
            pivot: kind.spawn_pivot(),
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline(always)]
    pub fn cells(&self) -> &[(i8, i8); 4] {
        &self.cells
    }

    /// First cell; `(column, row)` of this cell plus the rotation keys a position.
    #[inline(always)]
    pub fn anchor(&self) -> (i8, i8) {
        self.cells[0]
    }

    /// Rotation centre as `(x, y)`; half-integral for the I piece.
    pub fn center(&self) -> (f32, f32) {
        (self.pivot.0 as f32 / 2.0, self.pivot.1 as f32 / 2.0)
    }

    /// Rotate 90 degrees about the pivot. Does not check the board.
    pub fn rotate(&mut self, clockwise: bool) {
        self.rotation = if clockwise {
            self.rotation.cw()
        } else {
            self.rotation.ccw()
        };
        if self.kind == PieceKind::O {
            return;
        }

        let d: i8 = if clockwise { -1 } else { 1 };
        let (px, py) = self.pivot;
        for cell in &mut self.cells {
            let (x, y) = *cell;
            let nx = px + d * (py - 2 * y);
            let ny = py + d * (2 * x - px);
            debug_assert!(nx % 2 == 0 && ny % 2 == 0);
            *cell = (nx / 2, ny / 2);
        }
    }

    pub fn rotated(mut self, clockwise: bool) -> Self {
        self.rotate(clockwise);
        self
    }

    pub fn translate(&mut self, dx: i8, dy: i8) {
        for cell in &mut self.cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        self.pivot.0 += 2 * dx;
        self.pivot.1 += 2 * dy;
    }

    pub fn translated(mut self, dx: i8, dy: i8) -> Self {
        self.translate(dx, dy);
        self
    }

    /// All cells inside columns 0..=9 and rows 0..=21.
    pub fn within_playfield(&self) -> bool {
        self.cells.iter().all(|&(x, y)| {
            x >= 0 && (x as usize) < Board::WIDTH && y >= 0 && (y as usize) < Board::HEIGHT
        })
    }

    pub fn lowest_row(&self) -> i8 {
        self.cells.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }

    /// Distinct rows covered by the piece, highest first.
    pub fn rows(&self) -> SmallVec<[i8; 4]> {
        let mut rows: SmallVec<[i8; 4]> = self.cells.iter().map(|&(_, y)| y).collect();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();
        rows
    }
}
