//! tetrad-autoplay - drives a session with the placement search, either
//! inline or from a background worker.

pub mod driver;
pub mod worker;

pub use driver::{play, play_piece, preview_len, PlayError, PlaySummary};
pub use worker::{Actuator, Published, SharedSession, SolverWorker};
