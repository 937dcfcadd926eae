//! Random sources for spawning
//!
//! The simulation never reaches for ambient randomness; callers pass a
//! `RandomSource` so runs can be replayed exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws in `[0, 1)`
pub trait RandomSource {
    fn unit(&mut self) -> f32;
}

/// Seeded PCG generator (the default for real play)
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f32>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f32 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
