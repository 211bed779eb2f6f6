//! Movement primitives.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Movement {
    Down,
    Right,
    Left,
    RotateCw,
    RotateCcw,
}

impl Movement {
    /// Expansion order used by placement search. Ties between equal grades
    /// resolve to whichever placement this order reaches first.
    pub const ALL: [Movement; 5] = [
        Movement::Down,
        Movement::Right,
        Movement::Left,
        Movement::RotateCw,
        Movement::RotateCcw,
    ];

    /// Translation for shifts and drops, `None` for rotations.
    pub fn offset(self) -> Option<(i8, i8)> {
        match self {
            Movement::Down => Some((0, -1)),
            Movement::Right => Some((1, 0)),
            Movement::Left => Some((-1, 0)),
            Movement::RotateCw | Movement::RotateCcw => None,
        }
    }
}
