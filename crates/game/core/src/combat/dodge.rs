use crate::config::CombatParams;
use crate::env::RandomSource;

/// Chance to evade a hit: `min(cap, agility / divisor)`.
pub fn dodge_chance(defender_agility: u32, params: &CombatParams) -> f64 {
    (f64::from(defender_agility) / params.dodge_agility_divisor).min(params.dodge_cap)
}

/// Rolls a dodge for the defender. Always draws exactly once.
pub fn roll_dodge(
    defender_agility: u32,
    params: &CombatParams,
    rng: &mut impl RandomSource,
) -> bool {
    rng.chance(dodge_chance(defender_agility, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;

    #[test]
    fn chance_scales_then_caps() {
        let params = CombatParams::default();
        assert_eq!(dodge_chance(0, &params), 0.0);
        assert_eq!(dodge_chance(80, &params), 0.1);
        assert_eq!(dodge_chance(120, &params), 0.15);
        assert_eq!(dodge_chance(400, &params), 0.15);
    }

    #[test]
    fn roll_compares_against_chance() {
        let params = CombatParams::default();
        assert!(roll_dodge(80, &params, &mut SequenceRng::constant(0.09)));
        assert!(!roll_dodge(80, &params, &mut SequenceRng::constant(0.11)));
        assert!(!roll_dodge(0, &params, &mut SequenceRng::constant(0.0)));
    }
}
