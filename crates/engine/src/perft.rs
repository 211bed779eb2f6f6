//! perft - counts placement sequences, for movegen verification and benchmarks

use crate::movegen::generate_placements;
use rayon::prelude::*;
use tetrad_core::{Board, PieceKind, PieceState};

/// Number of distinct resting placements for `kind` spawned on `board`.
pub fn count_placements(board: &Board, kind: PieceKind) -> usize {
    generate_placements(board, &PieceState::spawn(kind)).len()
}

/// Count leaf boards after placing the first `depth` pieces of `queue`.
/// A branch whose next piece cannot spawn counts as a dead end.
pub fn perft(board: &Board, queue: &[PieceKind], depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let Some((&kind, rest)) = queue.split_first() else {
        return 1;
    };

    let placements = generate_placements(board, &PieceState::spawn(kind));
    if depth == 1 {
        return placements.len() as u64;
    }

    placements
        .par_iter()
        .map(|placement| {
            let mut next = *board;
            next.lock_and_clear(placement);
            perft_serial(&next, rest, depth - 1)
        })
        .sum()
}

fn perft_serial(board: &Board, queue: &[PieceKind], depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let Some((&kind, rest)) = queue.split_first() else {
        return 1;
    };

    let placements = generate_placements(board, &PieceState::spawn(kind));
    if depth == 1 {
        return placements.len() as u64;
    }

    let mut total = 0;
    for placement in &placements {
        let mut next = *board;
        next.lock_and_clear(placement);
        total += perft_serial(&next, rest, depth - 1);
    }
    total
}
