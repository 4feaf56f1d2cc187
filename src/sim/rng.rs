//! Injectable random source
//!
//! Every random decision in the simulation (kill rolls, breed rolls, twin
//! rolls, kind assignment, spawn kinematics) goes through [`SimRng`], so tests
//! can swap the seeded PCG stream for a scripted sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in `[0, 1)`
pub trait SimRng {
    /// Next uniform value in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform value in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Bernoulli trial with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform angle in `[0, 2π)`
    fn angle(&mut self) -> f32 {
        self.unit() * std::f32::consts::TAU
    }
}

impl SimRng for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Create the deterministic production RNG for a run seed
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, then a fallback value forever
///
/// Useful for forcing specific branches (e.g. "kill roll succeeds, pick the
/// second ball") without hunting for a seed that happens to do it.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }

    /// A source that always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(std::iter::empty(), value)
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl SimRng for ScriptedRng {
    fn unit(&mut self) -> f32 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
