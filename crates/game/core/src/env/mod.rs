//! Injected environment for battle rules.
//!
//! The rules never reach for ambient entropy. Callers hand in a
//! [`RandomSource`]: a seeded [`PcgRng`] for live play and replays, or a
//! [`SequenceRng`] when a test needs to pin every roll.
mod rng;

pub use rng::{PcgRng, RandomSource, SequenceRng};
