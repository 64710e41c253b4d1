//! Combat resolution.
//!
//! Pure functions for a single exchange. The battle engine decides when each
//! one runs; these functions only decide the numbers.
//!
//! - [`compute_damage`]: action formula, variance, then critical roll
//! - [`roll_dodge`]: bot-mode evasion, checked before damage
//! - [`endurance_heal`] / [`counter_reflect`]: trait effects

pub mod damage;
pub mod dodge;
pub mod effects;

pub use damage::{DamageRoll, apply_defend_posture, base_damage, compute_damage};
pub use dodge::{dodge_chance, roll_dodge};
pub use effects::{counter_reflect, endurance_heal};

/// Floors a computed value, absorbing representation error so that a
/// product meant to be exactly `n` never floors to `n - 1`.
pub(crate) fn floor_to_u32(value: f64) -> u32 {
    let floored = (value + 1e-9).floor();
    if floored <= 0.0 {
        0
    } else if floored >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        floored as u32
    }
}
