//! Wall-kick offsets tried after a blocked rotation.
//! Coordinates are y-up, so a positive dy lifts the piece.

use tetrad_core::{PieceKind, Rotation};

/// Kick offsets for a rotation transition, in attempt order.
/// Each offset is applied to the freshly rotated piece on its own.
pub fn get_kicks(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static [(i8, i8)] {
    let to = if clockwise { from.cw() } else { from.ccw() };
    let key = rotation_key(from, to);

    match kind {
        PieceKind::I => get_i_kicks(key),
        PieceKind::O => &[], // O cells never change
        _ => get_jlstz_kicks(key),
    }
}

fn rotation_key(from: Rotation, to: Rotation) -> u8 {
    from.index() as u8 * 10 + to.index() as u8
}

/// J, L, S, T, Z
fn get_jlstz_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        1 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // N -> E
        12 => &[(1, 0), (1, -1), (0, 2), (1, 2)],    // E -> S
        23 => &[(1, 0), (1, 1), (0, -2), (1, -2)],   // S -> W
        30 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)], // W -> N

        // CCW rotations
        3 => &[(1, 0), (1, 1), (0, -2), (1, -2)],    // N -> W
        10 => &[(1, 0), (1, -1), (0, 2), (1, 2)],    // E -> N
        21 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // S -> E
        32 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)], // W -> S

        _ => &[],
    }
}

fn get_i_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        1 => &[(-2, 0), (1, 0), (-2, -1), (1, 2)],  // N -> E
        12 => &[(-1, 0), (2, 0), (-1, 2), (2, -1)], // E -> S
        23 => &[(2, 0), (-1, 0), (2, 1), (-1, -2)], // S -> W
        30 => &[(1, 0), (-2, 0), (1, -2), (-2, 1)], // W -> N

        // CCW rotations
        3 => &[(-1, 0), (2, 0), (-1, 2), (2, -1)],  // N -> W
        10 => &[(2, 0), (-1, 0), (2, 1), (-1, -2)], // E -> N
        21 => &[(1, 0), (-2, 0), (1, -2), (-2, 1)], // S -> E
        32 => &[(-2, 0), (1, 0), (-2, -1), (1, 2)], // W -> S

        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_cw_kicks() {
        let kicks = get_kicks(PieceKind::T, Rotation::North, true);
        assert_eq!(kicks.len(), 4);
        assert_eq!(kicks[0], (-1, 0));
    }

    #[test]
    fn test_i_kicks() {
        let kicks = get_kicks(PieceKind::I, Rotation::North, true);
        assert_eq!(kicks.len(), 4);
        assert_eq!(kicks[0], (-2, 0));
    }

    #[test]
    fn test_o_no_kicks() {
        assert!(get_kicks(PieceKind::O, Rotation::North, true).is_empty());
    }

    #[test]
    fn test_every_transition_has_four_attempts() {
        for kind in [PieceKind::I, PieceKind::T, PieceKind::S, PieceKind::L] {
            for from in Rotation::ALL {
                for clockwise in [true, false] {
                    assert_eq!(get_kicks(kind, from, clockwise).len(), 4);
                }
            }
        }
    }

    #[test]
    fn test_jlstz_opposite_transitions_mirror() {
        // R -> 0 undoes 0 -> R
        for from in Rotation::ALL {
            let there = get_kicks(PieceKind::Z, from, true);
            let back = get_kicks(PieceKind::Z, from.cw(), false);
            for (a, b) in there.iter().zip(back) {
                assert_eq!((a.0, a.1), (-b.0, -b.1));
            }
        }
    }
}
