use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use tetrad_core::PieceKind;

/// Seeded 7-bag randomiser. Each bag holds every kind once and is
/// reshuffled when exhausted.
pub struct SevenBag {
    rng: StdRng,
    pending: VecDeque<PieceKind>,
}

impl SevenBag {
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            rng: StdRng::seed_from_u64(seed),
            pending: VecDeque::with_capacity(14),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        let mut fresh = PieceKind::ALL;
        fresh.shuffle(&mut self.rng);
        self.pending.extend(fresh);
    }

    pub fn next_piece(&mut self) -> PieceKind {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending
            .pop_front()
            .expect("refilled bag is never empty")
    }

    /// Upcoming `n` pieces without consuming them, drawing new bags as needed.
    pub fn peek(&mut self, n: usize) -> Vec<PieceKind> {
        while self.pending.len() < n {
            self.refill();
        }
        self.pending.iter().take(n).copied().collect()
    }

    /// Pieces left in the bags already drawn.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_creation() {
        let bag = SevenBag::new(1);
        assert_eq!(bag.remaining(), 7);
    }

    #[test]
    fn test_each_bag_is_a_permutation() {
        let mut bag = SevenBag::new(42);
        for _ in 0..5 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next_piece()).collect();
            drawn.sort_by_key(|k| *k as u8);
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_draws_across_many_refills() {
        let mut bag = SevenBag::new(3);
        let mut counts = [0u32; 7];
        for _ in 0..700 {
            counts[bag.next_piece() as usize] += 1;
        }
        assert_eq!(counts, [100; 7]);
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_bag_peek() {
        let mut bag = SevenBag::new(7);
        let ahead = bag.peek(10);
        assert_eq!(ahead.len(), 10);
        // ensure peek doesn't consume
        assert_eq!(bag.peek(10), ahead);
        for expected in ahead {
            assert_eq!(bag.next_piece(), expected);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SevenBag::new(99);
        let mut b = SevenBag::new(99);
        for _ in 0..21 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }
}
