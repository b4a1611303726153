//! RNG module - seedable random source for board population and planning
//!
//! Every random decision in a round (occupancy, cell placement, weighted draws, lock lines,
//! target picks) goes through [`SimpleRng`], so a session built from a seed replays the exact
//! same rounds for the same inputs.

use crate::types::ShapeKind;

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
    ///
    /// Uses the high bits of the state; the low bits of a power-of-two LCG cycle quickly.
    /// Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform float in [lo, hi]; a degenerate range returns `lo`
    pub fn next_between(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f64()
    }

    /// Pick one element uniformly
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i).copied()
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Weighted draw over a per-kind weight table
    ///
    /// Kinds with weight 0 are never returned. Returns `None` when every weight is 0.
    pub fn weighted_kind(&mut self, weights: &[u32; ShapeKind::COUNT]) -> Option<ShapeKind> {
        let total: u64 = weights.iter().map(|&w| w as u64).sum();
        if total == 0 {
            return None;
        }

        let mut roll = ((self.next_u32() as u128 * total as u128) >> 32) as u64;
        for kind in ShapeKind::ALL {
            let w = weights[kind.index()] as u64;
            if roll < w {
                return Some(kind);
            }
            roll -= w;
        }

        // Unreachable with a consistent total; keep the last spawnable kind as a guard.
        ShapeKind::ALL
            .iter()
            .rev()
            .copied()
            .find(|k| weights[k.index()] > 0)
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
