//! tetrad-engine - rotation, kicks, movement and move generation,
//! plus the game session the solver plays against.

pub mod bag;
pub mod collision;
pub mod gravity;
pub mod kicks;
pub mod movegen;
pub mod movement;
pub mod perft;
pub mod session;

pub use bag::SevenBag;
pub use collision::{can_place, collides, hard_drop};
pub use gravity::{frames_per_step, GravityConfig, FRAMES_PER_STEP};
pub use kicks::get_kicks;
pub use movegen::{generate_placements, VisitedSet};
pub use movement::{
    is_locked, rotate_with_kicks, successor, try_drop, try_rotate, RotationResult,
};
pub use session::{line_clear_points, LockReport, Session, SessionError, SessionSnapshot};
