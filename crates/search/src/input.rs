//! Snapshot of the session state a search reads.

use serde::{Deserialize, Serialize};
use tetrad_core::{Board, PieceKind, PieceState};
use tetrad_engine::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchInput {
    pub board: Board,
    /// Falling piece, as currently positioned.
    pub current: PieceState,
    pub next: Option<PieceKind>,
    /// Pieces after `next`, in draw order.
    pub preview: Vec<PieceKind>,
    pub level: u32,
    /// Spawn counter of the session this was taken from.
    pub generation: u64,
}

impl SearchInput {
    pub fn new(board: Board, current: PieceState) -> Self {
        Self {
            board,
            current,
            next: None,
            preview: Vec::new(),
            level: 1,
            generation: 0,
        }
    }

    pub fn with_next(mut self, next: PieceKind) -> Self {
        self.next = Some(next);
        self
    }

    pub fn with_preview(mut self, preview: &[PieceKind]) -> Self {
        self.preview = preview.to_vec();
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Piece placed at `depth`: the falling piece at depth 0, later pieces at spawn.
    pub fn piece_at(&self, depth: usize) -> Option<PieceState> {
        match depth {
            0 => Some(self.current),
            1 => self.next.map(PieceState::spawn),
            _ => self.preview.get(depth - 2).copied().map(PieceState::spawn),
        }
    }
}

impl From<SessionSnapshot> for SearchInput {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            board: snapshot.board,
            current: snapshot.falling,
            next: Some(snapshot.next),
            preview: snapshot.preview,
            level: snapshot.level,
            generation: snapshot.spawn_counter,
        }
    }
}
