//! Inline play loop: search, replay the movements, hard-drop.

use tetrad_engine::{LockReport, Session, SessionError};
use tetrad_search::{SearchConfig, SearchEngine, SearchError, SearchInput};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaySummary {
    pub pieces: u64,
    pub lines: u32,
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
}

impl PlaySummary {
    fn of(session: &Session, pieces: u64) -> Self {
        Self {
            pieces,
            lines: session.lines(),
            score: session.score(),
            level: session.level(),
            game_over: session.is_game_over(),
        }
    }
}

/// Preview pieces a search needs beyond the falling and next piece.
pub fn preview_len(config: &SearchConfig) -> usize {
    config.lookahead.saturating_sub(2)
}

/// Search the falling piece, walk it to the chosen placement and lock it.
pub fn play_piece(session: &mut Session, engine: &SearchEngine) -> Result<LockReport, PlayError> {
    let input = SearchInput::from(session.snapshot(preview_len(engine.config())));
    let result = engine.search(&input)?;
    for movement in result.movements() {
        session.apply(movement)?;
    }
    let report = session.hard_drop()?;
    debug_assert_eq!(report.piece, result.best_placement());
    Ok(report)
}

/// Play up to `max_pieces` pieces or until the game ends.
pub fn play(session: &mut Session, engine: &SearchEngine, max_pieces: u64) -> PlaySummary {
    let mut pieces = 0;
    while pieces < max_pieces && !session.is_game_over() {
        match play_piece(session, engine) {
            Ok(report) => {
                pieces += 1;
                if report.lines_cleared > 0 {
                    log::debug!(
                        "piece {pieces}: cleared {} (total {})",
                        report.lines_cleared,
                        session.lines()
                    );
                }
            }
            Err(err) => {
                log::warn!("stopping after {pieces} pieces: {err}");
                break;
            }
        }
    }
    PlaySummary::of(session, pieces)
}
