//! Column height profile for fast evaluation

use crate::Board;

/// Per-column heights (top occupied row + 1, empty column = 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnHeights {
    heights: [u8; Board::WIDTH],
}

impl ColumnHeights {
    pub fn new(board: &Board) -> Self {
        let mut heights = [0u8; Board::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            *height = board.column_height(x);
        }
        Self { heights }
    }

    pub fn total(&self) -> u32 {
        self.heights.iter().map(|&h| h as u32).sum()
    }

    pub fn max(&self) -> u8 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    pub fn min(&self) -> u8 {
        self.heights.iter().copied().min().unwrap_or(0)
    }

    /// max - min over all columns
    ///
    /// Empty columns take part in the minimum as height 0.
    pub fn spread(&self) -> u8 {
        self.max() - self.min()
    }

    /// Sum of absolute height differences between neighbouring columns.
    ///
    /// An empty column compares as height 0; the neighbour's height is not
    /// carried across it.
    pub fn dispersion(&self) -> u32 {
        self.heights
            .windows(2)
            .map(|w| (w[0] as i32 - w[1] as i32).unsigned_abs())
            .sum()
    }
}
