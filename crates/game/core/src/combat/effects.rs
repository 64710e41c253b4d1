//! Trait effects applied by the turn sequencer.

use crate::config::TraitParams;
use crate::env::RandomSource;

use super::floor_to_u32;

/// Endurance heal amount for a combatant with the given max health.
///
/// The caller caps the heal at max health.
pub fn endurance_heal(max_health: u32, params: &TraitParams) -> u32 {
    floor_to_u32(f64::from(max_health) * params.endurance_heal_fraction)
}

/// Rolls Counter against an incoming hit and returns the reflected amount.
///
/// Returns 0 when the roll fails. Reflected damage is final: it never
/// crits and is never countered in turn.
pub fn counter_reflect(incoming: u32, params: &TraitParams, rng: &mut impl RandomSource) -> u32 {
    if incoming == 0 || !rng.chance(params.counter_chance) {
        return 0;
    }
    floor_to_u32(f64::from(incoming) * params.counter_reflect_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;

    #[test]
    fn endurance_is_ten_percent_floored() {
        let params = TraitParams::default();
        assert_eq!(endurance_heal(100, &params), 10);
        assert_eq!(endurance_heal(95, &params), 9);
        assert_eq!(endurance_heal(9, &params), 0);
    }

    #[test]
    fn counter_reflects_half_on_success() {
        let params = TraitParams::default();
        assert_eq!(counter_reflect(41, &params, &mut SequenceRng::constant(0.2)), 20);
        assert_eq!(counter_reflect(41, &params, &mut SequenceRng::constant(0.3)), 0);
    }

    #[test]
    fn no_hit_no_roll() {
        let params = TraitParams::default();
        let mut rng = SequenceRng::constant(0.0);
        assert_eq!(counter_reflect(0, &params, &mut rng), 0);
        assert_eq!(rng.draws(), 0);
    }
}
