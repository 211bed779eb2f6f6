//! board representation - 22 rows of 10 cells, row 0 is the floor
//! each occupied cell remembers the kind of piece that filled it

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{PieceKind, PieceState};

/// 10x22 playfield stored row-major.
/// Flat fixed-size arrays keep the per-branch copies made by search cheap.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    rows: [[Option<PieceKind>; Board::WIDTH]; Board::HEIGHT],
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 22;

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rows of text, top row first; the last string is row 0.
    /// `.` or space is empty, a piece letter is a cell of that kind.
    ///
    /// # Panics
    /// On more than 22 rows, rows wider than 10 or unknown characters.
    pub fn from_ascii(rows: &[&str]) -> Self {
        assert!(rows.len() <= Self::HEIGHT, "too many rows: {}", rows.len());
        let mut board = Self::new();
        for (i, text) in rows.iter().enumerate() {
            let y = rows.len() - 1 - i;
            assert!(text.chars().count() <= Self::WIDTH, "row too wide: {text:?}");
            for (x, c) in text.chars().enumerate() {
                let cell = match c {
                    '.' | ' ' => None,
                    _ => Some(
                        PieceKind::from_letter(c)
                            .unwrap_or_else(|| panic!("unknown cell {c:?} in {text:?}")),
                    ),
                };
                board.rows[y][x] = cell;
            }
        }
        board
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.rows[y][x]
    }

    #[inline(always)]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x].is_some()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Option<PieceKind>) {
        self.rows[y][x] = cell;
    }

    pub fn row(&self, y: usize) -> &[Option<PieceKind>; Board::WIDTH] {
        &self.rows[y]
    }

    /// True for an in-bounds empty cell.
    #[inline(always)]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < Self::WIDTH
            && (y as usize) < Self::HEIGHT
            && self.rows[y as usize][x as usize].is_none()
    }

    /// Sole collision predicate: every cell in bounds and empty.
    #[inline]
    pub fn is_unobstructed(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_free(x, y))
    }

    #[inline]
    pub fn fits(&self, piece: &PieceState) -> bool {
        self.is_unobstructed(piece.cells())
    }

    /// Freeze the piece's cells into the grid.
    ///
    /// # Panics
    /// If any cell is outside the playfield or already occupied.
    pub fn lock(&mut self, piece: &PieceState) {
        assert!(
            self.fits(piece),
            "locking {:?} at {:?} onto occupied or out-of-bounds cells",
            piece.kind(),
            piece.cells()
        );
        for &(x, y) in piece.cells() {
            self.rows[y as usize][x as usize] = Some(piece.kind());
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(Option::is_some)
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.rows[y].iter().all(Option::is_none)
    }

    /// Distinct full rows among `rows`, highest first. Out-of-range rows are ignored.
    pub fn full_rows(&self, rows: &[i8]) -> SmallVec<[usize; 4]> {
        let mut full: SmallVec<[usize; 4]> = rows
            .iter()
            .filter(|&&y| y >= 0 && (y as usize) < Self::HEIGHT)
            .map(|&y| y as usize)
            .filter(|&y| self.is_row_full(y))
            .collect();
        full.sort_unstable_by(|a, b| b.cmp(a));
        full.dedup();
        full
    }

    /// Remove the full rows among `rows`, compacting everything above down.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self, rows: &[i8]) -> u8 {
        let full = self.full_rows(rows);
        // Highest first so lower indices stay valid.
        for &y in &full {
            self.rows.copy_within(y + 1.., y);
            self.rows[Self::HEIGHT - 1] = [None; Self::WIDTH];
        }
        full.len() as u8
    }

    /// Lock the piece and clear any rows it completed.
    pub fn lock_and_clear(&mut self, piece: &PieceState) -> u8 {
        self.lock(piece);
        self.clear_full_rows(&piece.rows())
    }

    /// Top occupied row + 1, 0 for an empty column.
    pub fn column_height(&self, x: usize) -> u8 {
        (0..Self::HEIGHT)
            .rev()
            .find(|&y| self.rows[y][x].is_some())
            .map_or(0, |y| (y + 1) as u8)
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..Self::HEIGHT).rev() {
            for x in 0..Self::WIDTH {
                let c = self.rows[y][x].map_or('.', PieceKind::letter);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
