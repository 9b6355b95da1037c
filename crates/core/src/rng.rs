//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! The generator is seedable so sessions (and tests) can be replayed exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Pieces per bag
pub const BAG_SIZE: usize = 7;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer<R = StdRng> {
    /// Current bag of pieces
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next piece to hand out
    index: usize,
    /// RNG for shuffling
    rng: R,
}

impl BagRandomizer<StdRng> {
    /// Create a deterministic randomizer from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a randomizer seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> BagRandomizer<R> {
    /// Create a randomizer that shuffles with the given RNG
    pub fn with_rng(rng: R) -> Self {
        let mut randomizer = Self {
            bag: PieceKind::ALL,
            index: 0,
            rng,
        };
        randomizer.refill_bag();
        randomizer
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.index = 0;
    }

    /// Hand out the next piece, starting a fresh bag once the current one is spent
    pub fn next_piece(&mut self) -> PieceKind {
        let piece = self.bag[self.index];
        self.index += 1;
        if self.index == BAG_SIZE {
            self.refill_bag();
        }
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.bag[self.index]
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }
}

impl<R: Rng> Iterator for BagRandomizer<R> {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.next_piece())
    }
}
