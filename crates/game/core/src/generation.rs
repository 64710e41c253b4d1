//! Opponent and bot generation.
//!
//! PvP opponents are rolled from fixed base ranges and scaled by level. Bots
//! mirror the player's own pet, scaled by difficulty and jittered per stat.

use tracing::debug;

use crate::action::Difficulty;
use crate::combat::floor_to_u32;
use crate::config::{BattleConfig, GeneratorParams, StatRange};
use crate::env::RandomSource;
use crate::error::BattleError;
use crate::progression::PetProfile;
use crate::stats::{Combatant, StatBlock, StatKind};

const MAX_TIER: u32 = 3;
const LEVELS_PER_TIER: u32 = 16;

/// Tier an opponent of `level` is shown at: `min(3, level / 16 + 1)`.
pub fn tier_for_level(level: u32) -> u8 {
    (level / LEVELS_PER_TIER + 1).min(MAX_TIER) as u8
}

fn range_for(params: &GeneratorParams, kind: StatKind) -> StatRange {
    match kind {
        StatKind::Health => params.health,
        StatKind::Energy => params.energy,
        StatKind::Strength => params.strength,
        StatKind::Defense => params.defense,
        StatKind::Stamina => params.stamina,
        StatKind::Agility => params.agility,
        StatKind::Attack => params.attack,
    }
}

fn roll_base(range: StatRange, rng: &mut impl RandomSource) -> u32 {
    if range.spread == 0 {
        return range.base;
    }
    let offset = rng.range_inclusive(0, i64::from(range.spread) - 1);
    range.base + offset.max(0) as u32
}

/// Generates a PvP opponent near the player's level.
///
/// Draw order: level offset, name, then one roll per stat in declaration order.
pub fn generate_opponent(
    player: &PetProfile,
    config: &BattleConfig,
    rng: &mut impl RandomSource,
) -> Result<Combatant, BattleError> {
    player.stats.validate(&player.name)?;
    let params = &config.generator;

    let spread = i64::from(params.level_spread);
    let offset = rng.range_inclusive(-spread, spread);
    let level = (i64::from(player.level) + offset).max(1) as u32;

    let name = if params.opponent_names.is_empty() {
        "Challenger".to_string()
    } else {
        let last = params.opponent_names.len() as i64 - 1;
        let index = rng.range_inclusive(0, last) as usize;
        params.opponent_names[index].clone()
    };

    let scale = 1.0 + f64::from(level - 1) * params.level_scale;
    let stats = StatBlock::from_fn(|kind| {
        let base = roll_base(range_for(params, kind), rng);
        floor_to_u32(f64::from(base) * scale)
    });

    debug!(%name, level, player_level = player.level, "generated pvp opponent");
    Combatant::new(name, level, tier_for_level(level), stats)
}

/// Builds a practice bot from the player's own pet.
///
/// Every stat is `floor(stat * difficulty * jitter)` with an independent
/// jitter per stat; level is `round(level * difficulty)`, at least 1.
pub fn create_bot_opponent(
    difficulty: Difficulty,
    player: &PetProfile,
    config: &BattleConfig,
    rng: &mut impl RandomSource,
) -> Result<Combatant, BattleError> {
    player.stats.validate(&player.name)?;
    let params = &config.generator;
    let multiplier = params.difficulty_multiplier(difficulty);

    let stats = StatBlock::from_fn(|kind| {
        let jitter = rng.range_f64(params.jitter_min, params.jitter_max);
        floor_to_u32(f64::from(player.stats.get(kind)) * multiplier * jitter)
    });
    // Heavy easy-mode scaling on a frail pet can round health down to zero.
    let stats = StatBlock {
        health: stats.health.max(1),
        ..stats
    };

    let level = ((f64::from(player.level) * multiplier + 1e-9).round() as u32).max(1);
    let name = format!("{} Bot", difficulty.label());

    debug!(%name, level, %difficulty, "generated practice bot");
    Combatant::new(name, level, player.tier, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};

    fn player(level: u32) -> PetProfile {
        let mut pet = PetProfile::new("vigor", "Vigor", StatBlock::new(80, 70, 65, 60, 90, 55, 70));
        pet.level = level;
        pet
    }

    #[test]
    fn opponent_level_stays_within_spread() {
        let config = BattleConfig::default();
        let mut rng = PcgRng::new(11);
        for _ in 0..500 {
            let opponent = generate_opponent(&player(10), &config, &mut rng).expect("valid player");
            assert!((8..=12).contains(&opponent.level));
            assert_eq!(opponent.tier, 1);
            assert_eq!(opponent.current_health(), opponent.max_health());
        }
    }

    #[test]
    fn opponent_level_floors_at_one() {
        let config = BattleConfig::default();
        let mut rng = SequenceRng::constant(0.0);
        let opponent = generate_opponent(&player(1), &config, &mut rng).expect("valid player");
        assert_eq!(opponent.level, 1);
        assert_eq!(opponent.name, "Shadow");
        // lowest base rolls, no scaling at level 1
        assert_eq!(opponent.stats, StatBlock::new(70, 60, 55, 50, 60, 50, 60));
    }

    #[test]
    fn opponent_stats_scale_with_level() {
        let config = BattleConfig::default();
        // offset +2, last name, top of every range
        let mut rng = SequenceRng::constant(0.999_999);
        let opponent = generate_opponent(&player(30), &config, &mut rng).expect("valid player");
        assert_eq!(opponent.level, 32);
        assert_eq!(opponent.tier, 3);
        assert_eq!(opponent.name, "Blaze");
        // 99 * (1 + 31 * 0.04) = 99 * 2.24 = 221.76
        assert_eq!(opponent.stats.health, 221);
    }

    #[test]
    fn tier_bands() {
        assert_eq!(tier_for_level(1), 1);
        assert_eq!(tier_for_level(15), 1);
        assert_eq!(tier_for_level(16), 2);
        assert_eq!(tier_for_level(32), 3);
        assert_eq!(tier_for_level(90), 3);
    }

    #[test]
    fn hard_bot_from_level_ten_pet() {
        let config = BattleConfig::default();
        let mut rng = PcgRng::new(3);
        for _ in 0..200 {
            let bot = create_bot_opponent(Difficulty::Hard, &player(10), &config, &mut rng)
                .expect("valid player");
            assert_eq!(bot.level, 12);
            assert_eq!(bot.name, "Hard Bot");
            // 80 * 1.15 * [0.95, 1.05) = [87.4, 96.6)
            assert!((87..=96).contains(&bot.stats.health), "health {}", bot.stats.health);
        }
    }

    #[test]
    fn easy_bot_is_weaker() {
        let config = BattleConfig::default();
        let mut rng = SequenceRng::constant(0.5);
        let bot = create_bot_opponent(Difficulty::Easy, &player(7), &config, &mut rng)
            .expect("valid player");
        // round(7 * 0.85) = round(5.95)
        assert_eq!(bot.level, 6);
        assert!(bot.stats.attack < 70);
        assert_eq!(bot.tier, 1);
    }

    #[test]
    fn missing_stats_are_fatal() {
        let config = BattleConfig::default();
        let mut pet = player(5);
        pet.stats.health = 0;
        let mut rng = SequenceRng::constant(0.5);

        let err = create_bot_opponent(Difficulty::Medium, &pet, &config, &mut rng)
            .expect_err("zero health pet");
        assert_eq!(err.severity(), crate::error::ErrorSeverity::Fatal);
        assert!(generate_opponent(&pet, &config, &mut rng).is_err());
    }
}
