//! RNG module - random sources for tile spawning
//!
//! The board never reaches for a global generator: every operation that needs
//! randomness takes a [`RandomSource`], so games can be replayed from a seed and
//! tests can script the exact draws.
//!
//! Also provides a simple LCG for deterministic testing.

use rand::Rng;

/// Uniform integer source used for spawn placement and spawn values
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is always > 0.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods; use the high half.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current state (for replaying from the same point)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_range(bound)
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}
