//! tetrad - placement search for a falling-block puzzle.
//!
//! Re-exports the workspace crates under one roof: board and piece
//! primitives, movement and session rules, the board evaluator, the
//! lookahead search and the autoplay worker.

pub use tetrad_autoplay as autoplay;
pub use tetrad_core as core;
pub use tetrad_engine as engine;
pub use tetrad_eval as eval;
pub use tetrad_search as search;

pub use tetrad_core::{Board, Movement, PieceKind, PieceState, Rotation};
pub use tetrad_engine::Session;
pub use tetrad_eval::{evaluate, Evaluator};
pub use tetrad_search::{SearchConfig, SearchEngine, SearchError, SearchInput, SearchResult};
