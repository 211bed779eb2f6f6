//! Single-player game session: falling piece, bag, gravity and scoring.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bag::SevenBag;
use crate::collision::hard_drop;
use crate::gravity::GravityConfig;
use crate::movement::{rotate_with_kicks, successor};
use tetrad_core::{Board, Movement, PieceKind, PieceState};

/// Base points for clearing 1, 2, 3 or 4 rows at once.
pub const LINE_POINTS: [u64; 4] = [40, 100, 300, 1200];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("game over: no room to spawn the next piece")]
    GameOver,
}

/// Outcome of locking the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockReport {
    pub piece: PieceState,
    pub rows_dropped: u8,
    pub lines_cleared: u8,
    pub score_delta: u64,
    /// The following piece could not spawn.
    pub topped_out: bool,
}

/// Read-only copy of everything a placement search needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub falling: PieceState,
    pub next: PieceKind,
    /// Pieces after `next`, in draw order.
    pub preview: Vec<PieceKind>,
    pub level: u32,
    pub spawn_counter: u64,
}

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_points(lines: u8, level: u32) -> u64 {
    match lines {
        1..=4 => (level as u64 + 1) * LINE_POINTS[lines as usize - 1],
        _ => 0,
    }
}

pub struct Session {
    board: Board,
    falling: PieceState,
    next: PieceKind,
    bag: SevenBag,
    gravity: GravityConfig,
    spawn_counter: u64,
    score: u64,
    lines: u32,
    level: u32,
    game_over: bool,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_board(Board::new(), seed)
    }

    /// Start on a prepared board. The session is over at once if the first
    /// piece cannot spawn.
    pub fn with_board(board: Board, seed: u64) -> Self {
        let mut bag = SevenBag::new(seed);
        let first = bag.next_piece();
        let gravity = GravityConfig::default();
        let mut session = Self {
            board,
            falling: PieceState::spawn(first),
            next: first,
            bag,
            gravity,
            spawn_counter: 0,
            score: 0,
            lines: 0,
            level: gravity.start_level,
            game_over: false,
        };
        // first spawn consumes the piece just drawn as `next`
        if session.spawn().is_err() {
            debug_assert!(session.game_over);
        }
        session
    }

    /// Promote `next` to the falling piece. Fails if its spawn cells are taken.
    fn spawn(&mut self) -> Result<(), SessionError> {
        let candidate = PieceState::spawn(self.next);
        if !self.board.fits(&candidate) {
            self.game_over = true;
            log::info!(
                "game over after {} pieces, score {}",
                self.spawn_counter,
                self.score
            );
            return Err(SessionError::GameOver);
        }

        let mut piece = candidate.translated(0, -2);
        while !self.board.fits(&piece) {
            piece.translate(0, 1);
        }
        self.falling = piece;
        self.next = self.bag.next_piece();
        self.spawn_counter += 1;
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.game_over {
            Err(SessionError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Apply one movement to the falling piece. Returns whether it moved.
    pub fn apply(&mut self, movement: Movement) -> Result<bool, SessionError> {
        self.ensure_running()?;
        let moved = match movement {
            Movement::RotateCw => rotate_with_kicks(&self.board, &mut self.falling, true),
            Movement::RotateCcw => rotate_with_kicks(&self.board, &mut self.falling, false),
            _ => match successor(&self.board, &self.falling, movement) {
                Some(next) => {
                    self.falling = next;
                    true
                }
                None => false,
            },
        };
        Ok(moved)
    }

    /// One gravity tick: drop a row, or lock if resting.
    pub fn step(&mut self) -> Result<Option<LockReport>, SessionError> {
        if self.apply(Movement::Down)? {
            Ok(None)
        } else {
            self.hard_drop().map(Some)
        }
    }

    /// Drop to the resting position, lock, clear rows, score, spawn the next piece.
    pub fn hard_drop(&mut self) -> Result<LockReport, SessionError> {
        self.ensure_running()?;
        let landed = hard_drop(&self.board, &self.falling);
        let rows_dropped = (self.falling.anchor().1 - landed.anchor().1) as u8;

        let lines_cleared = self.board.lock_and_clear(&landed);
        self.lines += lines_cleared as u32;
        self.level = self.gravity.level_for(self.lines);
        let score_delta = rows_dropped as u64 + line_clear_points(lines_cleared, self.level);
        self.score += score_delta;

        let topped_out = self.spawn().is_err();
        Ok(LockReport {
            piece: landed,
            rows_dropped,
            lines_cleared,
            score_delta,
            topped_out,
        })
    }

    /// Where the falling piece would land.
    pub fn projection(&self) -> PieceState {
        hard_drop(&self.board, &self.falling)
    }

    /// Copy out the state a search needs, with `preview_len` pieces after `next`.
    pub fn snapshot(&mut self, preview_len: usize) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            falling: self.falling,
            next: self.next,
            preview: self.bag.peek(preview_len),
            level: self.level,
            spawn_counter: self.spawn_counter,
        }
    }

    /// Jump to `level`, crediting the lines that level implies.
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(self.gravity.start_level);
        self.lines = (level - self.gravity.start_level) * self.gravity.lines_per_level;
        self.level = level;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> &PieceState {
        &self.falling
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Increments on every spawn; a change means a new piece is in play.
    pub fn spawn_counter(&self) -> u64 {
        self.spawn_counter
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_spawns_two_rows_down() {
        let session = Session::new(3);
        assert_eq!(session.spawn_counter(), 1);
        assert!(!session.is_game_over());
        let expected = PieceState::spawn(session.falling().kind()).translated(0, -2);
        assert_eq!(*session.falling(), expected);
    }

    #[test]
    fn test_hard_drop_scores_rows_dropped() {
        let mut session = Session::new(11);
        let start_row = session.falling().anchor().1;
        let landed_row = session.projection().anchor().1;
        let report = session.hard_drop().unwrap();
        assert_eq!(report.lines_cleared, 0);
        assert_eq!(report.rows_dropped as i8, start_row - landed_row);
        assert_eq!(report.score_delta, report.rows_dropped as u64);
        assert_eq!(session.score(), report.score_delta);
        assert_eq!(session.spawn_counter(), 2);
    }

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 80);
        assert_eq!(line_clear_points(4, 1), 2400);
        assert_eq!(line_clear_points(2, 3), 400);
    }

    #[test]
    fn test_spawn_blocked_is_game_over() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            board.set(x, 20, Some(PieceKind::Z));
        }
        let mut session = Session::with_board(board, 5);
        assert!(session.is_game_over());
        assert_eq!(session.apply(Movement::Left), Err(SessionError::GameOver));
        assert_eq!(session.hard_drop(), Err(SessionError::GameOver));
    }

    #[test]
    fn test_spawn_raised_above_stack() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            for y in 0..19 {
                if x != 0 {
                    board.set(x, y, Some(PieceKind::O));
                }
            }
        }
        let session = Session::with_board(board, 8);
        assert!(!session.is_game_over());
        assert!(session.falling().lowest_row() >= 19);
    }

    #[test]
    fn test_step_eventually_locks() {
        let mut session = Session::new(21);
        let mut report = None;
        for _ in 0..30 {
            if let Some(r) = session.step().unwrap() {
                report = Some(r);
                break;
            }
        }
        let report = report.expect("piece should lock within 30 steps");
        assert_eq!(report.rows_dropped, 0);
        assert_eq!(session.board().occupied_count(), 4);
    }

    #[test]
    fn test_snapshot_preview_matches_future_pieces() {
        let mut session = Session::new(77);
        let snap = session.snapshot(3);
        assert_eq!(snap.preview.len(), 3);
        assert_eq!(snap.next, session.next());
        session.hard_drop().unwrap();
        assert_eq!(session.falling().kind(), snap.next);
        assert_eq!(session.next(), snap.preview[0]);
    }

    #[test]
    fn test_set_level() {
        let mut session = Session::new(1);
        session.set_level(4);
        assert_eq!(session.level(), 4);
        assert_eq!(session.lines(), 30);
    }
}
