//! Randomness injected into the board
//!
//! The board never calls a global RNG. Queue refills and shake impulses come
//! from a [`Dice`], so tests can script them and runs can be replayed from a
//! seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{QUEUE_DRAW_RANKS, SHAKE_HORIZONTAL, SHAKE_UP_MIN, SHAKE_UP_SPAN};

pub trait Dice {
    /// Rank for a freshly refilled queue slot
    fn next_rank(&mut self) -> usize;
    /// Velocity kick applied to one ball during a shake
    fn shake_impulse(&mut self) -> Vec2;
}

/// Seeded PCG dice
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: Pcg32,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn next_rank(&mut self) -> usize {
        self.rng.random_range(0..QUEUE_DRAW_RANKS)
    }

    fn shake_impulse(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-SHAKE_HORIZONTAL..SHAKE_HORIZONTAL),
            -(SHAKE_UP_MIN + self.rng.random_range(0.0..SHAKE_UP_SPAN)),
        )
    }
}
