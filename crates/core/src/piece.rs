//! Piece kinds, rotation states and spawn shapes.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    L,
    J,
    S,
    Z,
    T,
    I,
    O,
}

/// Display colour of a locked cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Color {
    Orange,
    Blue,
    Green,
    Red,
    Purple,
    Cyan,
    Yellow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// 0 = spawn, 1 = one clockwise turn, 2 = half turn, 3 = one counter-clockwise turn.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
    ];

    /// Cells occupied at spawn, rows 20-21 of the playfield.
    /// The first cell is the anchor used to key positions.
    pub fn spawn_cells(self) -> [(i8, i8); 4] {
        match self {
            PieceKind::L => [(3, 20), (4, 20), (5, 20), (5, 21)],
            PieceKind::J => [(3, 21), (3, 20), (4, 20), (5, 20)],
            PieceKind::S => [(3, 20), (4, 20), (4, 21), (5, 21)],
            PieceKind::Z => [(3, 21), (4, 21), (4, 20), (5, 20)],
            PieceKind::T => [(3, 20), (4, 20), (5, 20), (4, 21)],
            PieceKind::I => [(3, 20), (4, 20), (5, 20), (6, 20)],
            PieceKind::O => [(4, 20), (4, 21), (5, 20), (5, 21)],
        }
    }

    /// Rotation centre in doubled coordinates.
    /// The I piece pivots on the corner point (4.5, 19.5).
    pub fn spawn_pivot(self) -> (i8, i8) {
        match self {
            PieceKind::I => (9, 39),
            PieceKind::O => (8, 42),
            _ => (8, 40),
        }
    }

    pub fn color(self) -> Color {
        match self {
            PieceKind::L => Color::Orange,
            PieceKind::J => Color::Blue,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::T => Color::Purple,
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'T' => Some(PieceKind::T),
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_spawn_cells() {
        let cells = PieceKind::T.spawn_cells();
        assert!(cells.contains(&(4, 21))); // top of T
        assert!(cells.contains(&(3, 20)));
        assert!(cells.contains(&(4, 20)));
        assert!(cells.contains(&(5, 20)));
    }

    #[test]
    fn test_rotation_cw() {
        assert_eq!(Rotation::North.cw(), Rotation::East);
        assert_eq!(Rotation::East.cw(), Rotation::South);
        assert_eq!(Rotation::South.cw(), Rotation::West);
        assert_eq!(Rotation::West.cw(), Rotation::North);
    }

    #[test]
    fn test_rotation_ccw() {
        assert_eq!(Rotation::North.ccw(), Rotation::West);
        assert_eq!(Rotation::West.ccw(), Rotation::South);
    }

    #[test]
    fn test_rotation_index_matches_all_order() {
        for (i, rot) in Rotation::ALL.into_iter().enumerate() {
            assert_eq!(rot.index(), i);
        }
    }

    #[test]
    fn test_spawn_cells_fit_top_rows() {
        for kind in PieceKind::ALL {
            for (x, y) in kind.spawn_cells() {
                assert!((0..10).contains(&x));
                assert!((20..22).contains(&y));
            }
        }
    }

    #[test]
    fn test_letters() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('.'), None);
    }
}
