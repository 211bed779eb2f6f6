//! Level speed table.
//!
//! Frames a piece waits before each gravity step, per level. The search uses
//! it to cap how many shifts or rotations fit between two drops.

use serde::{Deserialize, Serialize};

/// Frames per gravity step for levels 1..=30.
pub const FRAMES_PER_STEP: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1,
];

/// Frames per step at `level`. Levels past the table run at 1 frame.
pub fn frames_per_step(level: u32) -> u32 {
    match level {
        0 => FRAMES_PER_STEP[0],
        1..=30 => FRAMES_PER_STEP[level as usize - 1],
        _ => 1,
    }
}

/// Session pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityConfig {
    /// Start level (1-based).
    pub start_level: u32,
    /// Lines per level-up.
    pub lines_per_level: u32,
}

impl GravityConfig {
    pub fn classic() -> Self {
        Self {
            start_level: 1,
            lines_per_level: 10,
        }
    }

    /// Level reached after clearing `lines` in total.
    pub fn level_for(&self, lines: u32) -> u32 {
        self.start_level + lines / self.lines_per_level.max(1)
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self::classic()
    }
}
