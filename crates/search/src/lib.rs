//! tetrad-search - lookahead placement search and move reconstruction.

mod config;
mod input;
mod lock_table;
mod lookahead;
mod node;
mod reconstruct;

pub use config::{ConfigError, SearchConfig};
pub use input::SearchInput;
pub use lock_table::{LockPosition, LockPositionTable};
pub use lookahead::{SearchEngine, SearchError, SearchResult, SearchStats, TOP_OUT_PENALTY};
pub use node::{Ancestors, NodeArena, NodeId, SearchNode};
pub use reconstruct::movements_for;
