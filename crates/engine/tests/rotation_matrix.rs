use tetrad_core::{Board, Movement, PieceKind, PieceState, Rotation};
use tetrad_engine::{
    can_place, generate_placements, is_locked, rotate_with_kicks, successor, try_rotate,
};

fn caged_board(piece: &PieceState) -> Board {
    let mut board = Board::new();
    for y in 0..Board::HEIGHT {
        for x in 0..Board::WIDTH {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
    for &(x, y) in piece.cells() {
        board.set(x as usize, y as usize, None);
    }
    board
}

fn sorted(piece: &PieceState) -> Vec<(i8, i8)> {
    let mut v = piece.cells().to_vec();
    v.sort();
    v
}

mod rotation_identity {
    use super::*;

    #[test]
    fn test_four_kicked_turns_return_home() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            for clockwise in [true, false] {
                let start = PieceState::spawn(kind).translated(0, -8);
                let mut piece = start;
                for _ in 0..4 {
                    assert!(rotate_with_kicks(&board, &mut piece, clockwise));
                }
                assert_eq!(piece, start, "{kind:?} clockwise={clockwise}");
            }
        }
    }

    #[test]
    fn test_rotation_state_tracks_direction() {
        let board = Board::new();
        let mut piece = PieceState::spawn(PieceKind::J).translated(0, -8);
        rotate_with_kicks(&board, &mut piece, true);
        assert_eq!(piece.rotation(), Rotation::East);
        rotate_with_kicks(&board, &mut piece, true);
        assert_eq!(piece.rotation(), Rotation::South);
        rotate_with_kicks(&board, &mut piece, false);
        rotate_with_kicks(&board, &mut piece, false);
        rotate_with_kicks(&board, &mut piece, false);
        assert_eq!(piece.rotation(), Rotation::West);
    }
}

mod kick_rollback {
    use super::*;

    #[test]
    fn test_caged_pieces_never_turn() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            for rotation_steps in 0..4 {
                let mut start = PieceState::spawn(kind).translated(0, -10);
                for _ in 0..rotation_steps {
                    start.rotate(true);
                }
                let board = caged_board(&start);
                assert!(can_place(&board, &start));
                for clockwise in [true, false] {
                    let mut piece = start;
                    assert!(!rotate_with_kicks(&board, &mut piece, clockwise));
                    assert_eq!(piece, start, "{kind:?} steps={rotation_steps}");
                    assert!(try_rotate(&board, &start, clockwise).is_none());
                }
            }
        }
    }

    #[test]
    fn test_o_turns_in_place_even_when_caged() {
        let start = PieceState::spawn(PieceKind::O).translated(2, -15);
        let board = caged_board(&start);
        let mut piece = start;
        assert!(rotate_with_kicks(&board, &mut piece, true));
        assert_eq!(piece.cells(), start.cells());
    }

    #[test]
    fn test_kick_off_right_wall() {
        // T with its bar on column 9; turning to North needs one step left
        let west = PieceState::spawn(PieceKind::T)
            .rotated(false)
            .translated(5, -10);
        assert_eq!(sorted(&west), vec![(8, 10), (9, 9), (9, 10), (9, 11)]);

        let board = Board::new();
        let result = try_rotate(&board, &west, true).unwrap();
        assert_eq!(result.kick_index, 1);
        assert_eq!(result.piece.rotation(), Rotation::North);
        assert_eq!(sorted(&result.piece), vec![(7, 10), (8, 10), (8, 11), (9, 10)]);
    }
}

mod line_clear {
    use super::*;

    #[test]
    fn test_vertical_i_clears_exactly_k_rows() {
        for k in 1..=4usize {
            let mut board = Board::new();
            for x in 0..Board::WIDTH {
                if x % 2 == 0 || x == 9 {
                    board.set(x, 0, Some(PieceKind::L));
                }
            }
            for y in 1..=k {
                for x in 0..9 {
                    board.set(x, y, Some(PieceKind::J));
                }
            }
            board.set(2, 5, Some(PieceKind::O));
            let floor_row = *board.row(0);

            let i = PieceState::spawn(PieceKind::I)
                .rotated(true)
                .translated(4, -17);
            assert_eq!(sorted(&i), vec![(9, 1), (9, 2), (9, 3), (9, 4)]);

            let cleared = board.lock_and_clear(&i);
            assert_eq!(cleared as usize, k);
            assert_eq!(*board.row(0), floor_row);
            assert_eq!(board.get(2, 5 - k), Some(PieceKind::O));
            for y in 1..=4 - k {
                assert_eq!(board.get(9, y), Some(PieceKind::I));
                assert_eq!(board.get(0, y), None);
            }
        }
    }
}

mod placements {
    use super::*;

    #[test]
    fn test_every_placement_is_locked_and_unobstructed() {
        let board = Board::from_ascii(&[
            "...T......",
            "..TTT..S..",
            "Z.....SS.O",
            "ZZ.L..S.OO",
            ".Z.LLLJJJO",
        ]);
        for kind in PieceKind::ALL {
            let placements = generate_placements(&board, &PieceState::spawn(kind));
            assert!(!placements.is_empty(), "{kind:?}");
            for p in &placements {
                assert!(can_place(&board, p));
                assert!(is_locked(&board, p));
            }
        }
    }

    #[test]
    fn test_tuck_under_overhang_is_reachable() {
        // overhang at columns 0-2 row 2 leaves a tunnel on row 0-1
        let board = Board::from_ascii(&[
            "ZZZ.......", //
            "..........",
            "..........",
        ]);
        let placements = generate_placements(&board, &PieceState::spawn(PieceKind::O));
        assert!(placements
            .iter()
            .any(|p| p.anchor() == (0, 0) && p.rotation() == Rotation::North));
    }

    #[test]
    fn test_successor_none_at_wall() {
        let board = Board::new();
        let piece = PieceState::spawn(PieceKind::L).translated(-3, 0);
        assert_eq!(successor(&board, &piece, Movement::Left), None);
        assert!(successor(&board, &piece, Movement::Right).is_some());
    }
}
