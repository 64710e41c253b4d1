//! Random sources for deterministic battle resolution.
//!
//! Every probabilistic rule (damage variance, critical hits, dodges, counters,
//! opponent generation, AI picks) draws uniform values in `[0, 1)` from a
//! [`RandomSource`]. Given the same seed, [`PcgRng`] yields the same sequence,
//! so a battle can be replayed from its seed and the player's inputs.

/// Source of uniform random draws.
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the helpers are
/// expressed in terms of it so a scripted source controls every derived roll.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns true with the given probability.
    ///
    /// Probabilities at or below zero never fire and at or above one always do.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform value in `[min, max)`.
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max]`. Returns `min` for an empty range.
    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        min + offset.min(max - min)
    }

    /// Fair coin used for tie-breaks.
    fn coin_flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit state, 32-bit output.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    ///
    /// The seed goes through an avalanche mix first so that neighbouring
    /// seeds (0, 1, 2, ...) start far apart.
    pub fn new(seed: u64) -> Self {
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        Self { state: hash }
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Advances the generator and returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.step();
        Self::output(self.state)
    }
}

impl RandomSource for PcgRng {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` so a script cannot produce an
/// out-of-range roll.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Source that always yields the same draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
