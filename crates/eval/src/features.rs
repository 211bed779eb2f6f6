//! Structural features of a settled board.

use serde::{Deserialize, Serialize};
use tetrad_core::{Board, ColumnHeights};

const ROWS: usize = Board::HEIGHT;
const COLS: usize = Board::WIDTH;

/// Raw feature counts fed to the weighted grade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub lines: u32,
    /// Sum over the chain of each piece's lowest row (22 for an empty slot).
    pub lock_heights: u32,
    pub well_cells: u32,
    /// Wells three or more cells deep.
    pub deep_wells: u32,
    pub holes: u32,
    /// Each hole cell weighted by `22 - row`, so buried holes cost more.
    pub weighted_holes: u32,
    pub hole_depth: u32,
    pub min_hole_depth: u32,
    pub max_hole_depth: u32,
    pub column_transitions: u32,
    pub row_transitions: u32,
    pub total_height: u32,
    pub max_height: u32,
    pub height_spread: u32,
    pub solid_cells: u32,
    pub weighted_solid_cells: u32,
    pub height_dispersion: u32,
}

impl Features {
    /// Compute every feature for a post-lock, post-clear board.
    /// `lock_heights` holds the lowest row of each piece in the chain, `None` for unused slots.
    pub fn extract(lines: u32, board: &Board, lock_heights: &[Option<i8>]) -> Self {
        let heights = ColumnHeights::new(board);
        let wells = count_wells(board);
        let holes = count_holes(board);
        let (solid_cells, weighted_solid_cells) = count_solid_cells(board);

        Self {
            lines,
            lock_heights: lock_heights
                .iter()
                .map(|h| h.map_or(ROWS as u32, |row| row.max(0) as u32))
                .sum(),
            well_cells: wells.cells,
            deep_wells: wells.deep,
            holes: holes.count,
            weighted_holes: holes.weighted,
            hole_depth: holes.total_depth,
            min_hole_depth: holes.min_depth,
            max_hole_depth: holes.max_depth,
            column_transitions: count_column_transitions(board),
            row_transitions: count_row_transitions(board),
            total_height: heights.total(),
            max_height: heights.max() as u32,
            height_spread: heights.spread() as u32,
            solid_cells,
            weighted_solid_cells,
            height_dispersion: heights.dispersion(),
        }
    }
}

struct Wells {
    cells: u32,
    deep: u32,
}

struct Holes {
    count: u32,
    weighted: u32,
    total_depth: u32,
    min_depth: u32,
    max_depth: u32,
}

/// Empty cell whose side neighbours are both filled; walls count as filled.
fn is_well(board: &Board, x: usize, y: usize) -> bool {
    if board.is_occupied(x, y) {
        return false;
    }
    let left = x == 0 || board.is_occupied(x - 1, y);
    let right = x == COLS - 1 || board.is_occupied(x + 1, y);
    left && right
}

/// Scan each column from the top through open cells; the first well cell
/// starts the column's only well, which runs down while cells stay wells.
fn count_wells(board: &Board) -> Wells {
    let mut wells = Wells { cells: 0, deep: 0 };
    for x in 0..COLS {
        for y in (0..ROWS).rev() {
            if board.is_occupied(x, y) {
                break;
            }
            if is_well(board, x, y) {
                let depth = (0..=y).rev().take_while(|&k| is_well(board, x, k)).count() as u32;
                wells.cells += depth;
                if depth >= 3 {
                    wells.deep += 1;
                }
                break;
            }
        }
    }
    wells
}

/// A hole is an empty run directly beneath a filled cell.
fn count_holes(board: &Board) -> Holes {
    let mut holes = Holes {
        count: 0,
        weighted: 0,
        total_depth: 0,
        min_depth: ROWS as u32,
        max_depth: 0,
    };
    for x in 0..COLS {
        for y in (1..ROWS).rev() {
            if !board.is_occupied(x, y) || board.is_occupied(x, y - 1) {
                continue;
            }
            let mut depth = 0u32;
            for k in (0..y).rev() {
                if board.is_occupied(x, k) {
                    break;
                }
                depth += 1;
                holes.weighted += (ROWS - k) as u32;
            }
            holes.count += 1;
            holes.total_depth += depth;
            holes.min_depth = holes.min_depth.min(depth);
            holes.max_depth = holes.max_depth.max(depth);
        }
    }
    holes
}

fn count_column_transitions(board: &Board) -> u32 {
    let mut transitions = 0;
    for x in 0..COLS {
        for y in 0..ROWS - 1 {
            if board.is_occupied(x, y) != board.is_occupied(x, y + 1) {
                transitions += 1;
            }
        }
    }
    transitions
}

/// Walls count as filled; a completely empty row contributes nothing.
/// Every neighbouring pair is compared, columns 0 and 1 included.
fn count_row_transitions(board: &Board) -> u32 {
    let mut transitions = 0;
    for y in 0..ROWS {
        if board.is_row_empty(y) {
            continue;
        }
        if !board.is_occupied(0, y) {
            transitions += 1;
        }
        if !board.is_occupied(COLS - 1, y) {
            transitions += 1;
        }
        for x in 0..COLS - 1 {
            if board.is_occupied(x, y) != board.is_occupied(x + 1, y) {
                transitions += 1;
            }
        }
    }
    transitions
}

/// (count, sum of row + 1)
fn count_solid_cells(board: &Board) -> (u32, u32) {
    let mut count = 0;
    let mut weighted = 0;
    for y in 0..ROWS {
        for x in 0..COLS {
            if board.is_occupied(x, y) {
                count += 1;
                weighted += y as u32 + 1;
            }
        }
    }
    (count, weighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_features() {
        let f = Features::extract(0, &Board::new(), &[None, None]);
        assert_eq!(f.lock_heights, 44);
        assert_eq!(f.well_cells, 0);
        assert_eq!(f.holes, 0);
        assert_eq!(f.min_hole_depth, 22);
        assert_eq!(f.max_hole_depth, 0);
        assert_eq!(f.row_transitions, 0);
        assert_eq!(f.column_transitions, 0);
        assert_eq!(f.solid_cells, 0);
    }

    #[test]
    fn test_small_stack_features() {
        let board = Board::from_ascii(&[
            "I.........", //
            "I.I.......",
        ]);
        let f = Features::extract(0, &board, &[Some(0), None]);
        assert_eq!(f.lock_heights, 22);
        assert_eq!(f.solid_cells, 3);
        assert_eq!(f.weighted_solid_cells, 4);
        assert_eq!(f.total_height, 3);
        assert_eq!(f.max_height, 2);
        assert_eq!(f.height_spread, 2);
        assert_eq!(f.height_dispersion, 4);
        assert_eq!(f.holes, 0);
        assert_eq!(f.column_transitions, 2);
        assert_eq!(f.row_transitions, 6);
        assert_eq!(f.well_cells, 1);
        assert_eq!(f.deep_wells, 0);
    }

    #[test]
    fn test_hole_features() {
        let board = Board::from_ascii(&[
            ".....O....",
            ".O........",
            ".....O....",
            "..........",
        ]);
        let f = Features::extract(0, &board, &[]);
        assert_eq!(f.holes, 3);
        assert_eq!(f.weighted_holes, 85);
        assert_eq!(f.hole_depth, 4);
        assert_eq!(f.min_hole_depth, 1);
        assert_eq!(f.max_hole_depth, 2);
    }

    #[test]
    fn test_three_deep_well_is_deep() {
        let board = Board::from_ascii(&[
            "LLLL.LLLLL",
            "JJJJ.JJJJJ",
            "ZZZZ.ZZZZZ",
        ]);
        let f = Features::extract(0, &board, &[]);
        assert_eq!(f.well_cells, 3);
        assert!(f.deep_wells >= 1);
    }

    #[test]
    fn test_wall_well() {
        let board = Board::from_ascii(&[
            ".SSSSSSSSS", //
            ".SSSSSSSSS",
        ]);
        let f = Features::extract(0, &board, &[]);
        assert_eq!(f.well_cells, 2);
        assert_eq!(f.deep_wells, 0);
    }

    #[test]
    fn test_row_transitions_include_first_column_pair() {
        let board = Board::from_ascii(&["I........."]);
        let f = Features::extract(0, &board, &[]);
        // x0 | x1 and x9 | right wall
        assert_eq!(f.row_transitions, 2);
    }

    #[test]
    fn test_full_row_has_no_row_transitions() {
        let board = Board::from_ascii(&["TTTTTTTTTT"]);
        let f = Features::extract(0, &board, &[]);
        assert_eq!(f.row_transitions, 0);
        assert_eq!(f.column_transitions, 10);
    }
}
