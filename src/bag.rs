//! 7-bag randomizer for piece generation
//!
//! All 7 pieces are shuffled, then dealt out before reshuffling. This bounds
//! the gap between two pieces of the same kind to 12 spawns.

use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Number of pieces in one bag, and the minimum lookahead kept queued
pub const BAG_SIZE: usize = TetrominoType::ALL.len();

/// The 7-bag piece randomizer
///
/// Generic over the random source so sessions can be replayed from a seed or
/// driven by a scripted generator in tests.
#[derive(Debug, Clone)]
pub struct Bag<R = ChaCha8Rng> {
    /// Preview queue for upcoming pieces
    queue: VecDeque<TetrominoType>,
    rng: R,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Create a bag with a deterministic piece sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Bag<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(BAG_SIZE * 2),
            rng,
        };
        bag.ensure_lookahead();
        bag
    }

    /// Get the next piece from the queue
    pub fn next(&mut self) -> TetrominoType {
        self.ensure_lookahead();
        let kind = self
            .queue
            .pop_front()
            .expect("lookahead keeps the queue non-empty");
        // Keep a full bag visible for the preview
        self.ensure_lookahead();
        kind
    }

    /// Head of the queue, i.e. the piece the next spawn will use
    pub fn peek(&self) -> Option<TetrominoType> {
        self.queue.front().copied()
    }

    /// Preview the next N pieces without removing them
    pub fn preview(&self, count: usize) -> impl Iterator<Item = TetrominoType> + '_ {
        self.queue.iter().copied().take(count)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop queued pieces and deal a fresh bag (used on restart)
    pub fn reset(&mut self) {
        self.queue.clear();
        self.ensure_lookahead();
    }

    /// Append whole bags until at least one full bag is queued
    pub fn ensure_lookahead(&mut self) {
        while self.queue.len() < BAG_SIZE {
            self.refill();
        }
    }

    /// Refill the queue with a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::ALL;
        // Fisher-Yates: every permutation is equally likely
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::with_seed(7);

        for _ in 0..10 {
            let pieces: HashSet<_> = (0..BAG_SIZE).map(|_| bag.next()).collect();
            assert_eq!(pieces.len(), BAG_SIZE);
        }
    }

    #[test]
    fn test_lookahead_after_every_draw() {
        let mut bag = Bag::with_seed(1);
        for _ in 0..50 {
            let expected = bag.peek();
            assert_eq!(Some(bag.next()), expected);
            assert!(bag.len() >= BAG_SIZE);
        }
    }

    #[test]
    fn test_preview() {
        let bag = Bag::with_seed(3);
        let preview: Vec<_> = bag.preview(5).collect();
        assert_eq!(preview.len(), 5);
        assert_eq!(preview.first().copied(), bag.peek());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(42);
        let mut b = Bag::with_seed(42);
        for _ in 0..30 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_scripted_rng_is_accepted() {
        let mut bag = Bag::with_rng(StepRng::new(0, 0));
        let first: HashSet<_> = (0..BAG_SIZE).map(|_| bag.next()).collect();
        assert_eq!(first.len(), BAG_SIZE);
    }

    #[test]
    fn test_reset_deals_whole_bag() {
        let mut bag = Bag::with_seed(9);
        bag.next();
        bag.next();
        bag.reset();
        assert_eq!(bag.len(), BAG_SIZE);
        let pieces: HashSet<_> = (0..BAG_SIZE).map(|_| bag.next()).collect();
        assert_eq!(pieces.len(), BAG_SIZE);
    }

    #[test]
    fn test_first_position_is_roughly_uniform() {
        // 7000 bags, each kind should lead ~1000 of them
        let mut bag = Bag::with_seed(2024);
        let mut counts: HashMap<TetrominoType, u32> = HashMap::new();
        for _ in 0..7000 {
            bag.reset();
            let head = bag.next();
            *counts.entry(head).or_default() += 1;
        }
        assert_eq!(counts.len(), BAG_SIZE);
        for (kind, count) in counts {
            assert!((800..1200).contains(&count), "{kind:?} led {count} bags");
        }
    }
}
