//! Tunable battle parameters.
//!
//! Every constant the rules read lives here so content files can override
//! balance without touching code. AI thresholds are fixed in the strategy
//! trees and are not part of this config.

use crate::action::{BattleMode, Difficulty};

/// Root configuration consumed by the battle rules.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub combat: CombatParams,
    pub traits: TraitParams,
    pub generator: GeneratorParams,
    pub rewards: RewardParams,
    pub energy: EnergyParams,
    pub leveling: LevelingParams,
    pub evolution: EvolutionParams,
}

impl BattleConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Damage formula coefficients, variance and dodge tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    pub attack_attack_coef: f64,
    pub attack_strength_coef: f64,
    pub attack_defense_coef: f64,
    pub special_attack_coef: f64,
    pub special_energy_coef: f64,
    pub special_defense_coef: f64,
    pub variance_min: f64,
    pub variance_max: f64,
    /// Multiplier applied to a hit landing on a defending combatant.
    pub defend_multiplier: f64,
    pub dodge_cap: f64,
    pub dodge_agility_divisor: f64,
}

impl CombatParams {
    pub const DEFAULT_ATTACK_ATTACK_COEF: f64 = 0.8;
    pub const DEFAULT_ATTACK_STRENGTH_COEF: f64 = 0.2;
    pub const DEFAULT_ATTACK_DEFENSE_COEF: f64 = 0.3;
    pub const DEFAULT_SPECIAL_ATTACK_COEF: f64 = 1.2;
    pub const DEFAULT_SPECIAL_ENERGY_COEF: f64 = 0.5;
    pub const DEFAULT_SPECIAL_DEFENSE_COEF: f64 = 0.2;
    pub const DEFAULT_VARIANCE_MIN: f64 = 0.85;
    pub const DEFAULT_VARIANCE_MAX: f64 = 1.15;
    pub const DEFAULT_DEFEND_MULTIPLIER: f64 = 0.5;
    pub const DEFAULT_DODGE_CAP: f64 = 0.15;
    pub const DEFAULT_DODGE_AGILITY_DIVISOR: f64 = 800.0;
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            attack_attack_coef: Self::DEFAULT_ATTACK_ATTACK_COEF,
            attack_strength_coef: Self::DEFAULT_ATTACK_STRENGTH_COEF,
            attack_defense_coef: Self::DEFAULT_ATTACK_DEFENSE_COEF,
            special_attack_coef: Self::DEFAULT_SPECIAL_ATTACK_COEF,
            special_energy_coef: Self::DEFAULT_SPECIAL_ENERGY_COEF,
            special_defense_coef: Self::DEFAULT_SPECIAL_DEFENSE_COEF,
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            defend_multiplier: Self::DEFAULT_DEFEND_MULTIPLIER,
            dodge_cap: Self::DEFAULT_DODGE_CAP,
            dodge_agility_divisor: Self::DEFAULT_DODGE_AGILITY_DIVISOR,
        }
    }
}

/// Thresholds and effect magnitudes for the passive trait catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraitParams {
    pub endurance_stamina_threshold: u32,
    /// Fraction of max health restored at the start of each own turn.
    pub endurance_heal_fraction: f64,
    pub counter_defense_threshold: u32,
    pub counter_chance: f64,
    /// Fraction of the incoming hit reflected back to the attacker.
    pub counter_reflect_fraction: f64,
    pub critical_strength_threshold: u32,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
}

impl TraitParams {
    pub const DEFAULT_ENDURANCE_STAMINA_THRESHOLD: u32 = 70;
    pub const DEFAULT_ENDURANCE_HEAL_FRACTION: f64 = 0.10;
    pub const DEFAULT_COUNTER_DEFENSE_THRESHOLD: u32 = 60;
    pub const DEFAULT_COUNTER_CHANCE: f64 = 0.25;
    pub const DEFAULT_COUNTER_REFLECT_FRACTION: f64 = 0.5;
    pub const DEFAULT_CRITICAL_STRENGTH_THRESHOLD: u32 = 80;
    pub const DEFAULT_CRITICAL_CHANCE: f64 = 0.15;
    pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 2.0;
}

impl Default for TraitParams {
    fn default() -> Self {
        Self {
            endurance_stamina_threshold: Self::DEFAULT_ENDURANCE_STAMINA_THRESHOLD,
            endurance_heal_fraction: Self::DEFAULT_ENDURANCE_HEAL_FRACTION,
            counter_defense_threshold: Self::DEFAULT_COUNTER_DEFENSE_THRESHOLD,
            counter_chance: Self::DEFAULT_COUNTER_CHANCE,
            counter_reflect_fraction: Self::DEFAULT_COUNTER_REFLECT_FRACTION,
            critical_strength_threshold: Self::DEFAULT_CRITICAL_STRENGTH_THRESHOLD,
            critical_chance: Self::DEFAULT_CRITICAL_CHANCE,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
        }
    }
}

/// Half-open base range `[base, base + spread)` for one generated stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRange {
    pub base: u32,
    pub spread: u32,
}

impl StatRange {
    pub const fn new(base: u32, spread: u32) -> Self {
        Self { base, spread }
    }
}

/// Opponent and bot generation tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorParams {
    pub health: StatRange,
    pub energy: StatRange,
    pub strength: StatRange,
    pub defense: StatRange,
    pub stamina: StatRange,
    pub agility: StatRange,
    pub attack: StatRange,
    /// Opponent level is the player's level plus a uniform offset in `[-spread, spread]`.
    pub level_spread: u32,
    /// Stat scale per level above 1.
    pub level_scale: f64,
    pub easy_multiplier: f64,
    pub medium_multiplier: f64,
    pub hard_multiplier: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub opponent_names: Vec<String>,
}

impl GeneratorParams {
    pub const DEFAULT_HEALTH: StatRange = StatRange::new(70, 30);
    pub const DEFAULT_ENERGY: StatRange = StatRange::new(60, 35);
    pub const DEFAULT_STRENGTH: StatRange = StatRange::new(55, 40);
    pub const DEFAULT_DEFENSE: StatRange = StatRange::new(50, 40);
    pub const DEFAULT_STAMINA: StatRange = StatRange::new(60, 30);
    pub const DEFAULT_AGILITY: StatRange = StatRange::new(50, 45);
    pub const DEFAULT_ATTACK: StatRange = StatRange::new(60, 30);
    pub const DEFAULT_LEVEL_SPREAD: u32 = 2;
    pub const DEFAULT_LEVEL_SCALE: f64 = 0.04;
    pub const DEFAULT_EASY_MULTIPLIER: f64 = 0.85;
    pub const DEFAULT_MEDIUM_MULTIPLIER: f64 = 1.0;
    pub const DEFAULT_HARD_MULTIPLIER: f64 = 1.15;
    pub const DEFAULT_JITTER_MIN: f64 = 0.95;
    pub const DEFAULT_JITTER_MAX: f64 = 1.05;
    pub const DEFAULT_OPPONENT_NAMES: [&'static str; 4] = ["Shadow", "Thunder", "Rocky", "Blaze"];

    pub fn difficulty_multiplier(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_multiplier,
            Difficulty::Medium => self.medium_multiplier,
            Difficulty::Hard => self.hard_multiplier,
        }
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            health: Self::DEFAULT_HEALTH,
            energy: Self::DEFAULT_ENERGY,
            strength: Self::DEFAULT_STRENGTH,
            defense: Self::DEFAULT_DEFENSE,
            stamina: Self::DEFAULT_STAMINA,
            agility: Self::DEFAULT_AGILITY,
            attack: Self::DEFAULT_ATTACK,
            level_spread: Self::DEFAULT_LEVEL_SPREAD,
            level_scale: Self::DEFAULT_LEVEL_SCALE,
            easy_multiplier: Self::DEFAULT_EASY_MULTIPLIER,
            medium_multiplier: Self::DEFAULT_MEDIUM_MULTIPLIER,
            hard_multiplier: Self::DEFAULT_HARD_MULTIPLIER,
            jitter_min: Self::DEFAULT_JITTER_MIN,
            jitter_max: Self::DEFAULT_JITTER_MAX,
            opponent_names: Self::DEFAULT_OPPONENT_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Payout for one bot difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotRewardBand {
    pub win_gems_min: u32,
    pub win_gems_max: u32,
    pub win_xp: u64,
    /// Gems lost on defeat, before clamping against the balance.
    pub loss_gems: u32,
}

impl BotRewardBand {
    pub const fn new(win_gems_min: u32, win_gems_max: u32, win_xp: u64, loss_gems: u32) -> Self {
        Self {
            win_gems_min,
            win_gems_max,
            win_xp,
            loss_gems,
        }
    }
}

/// Runner score tier: scores at or above `min_score` pay `gems`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerTier {
    pub min_score: u64,
    pub gems: u32,
}

impl RunnerTier {
    pub const fn new(min_score: u64, gems: u32) -> Self {
        Self { min_score, gems }
    }
}

/// Gem and XP payouts for every mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardParams {
    pub pvp_win_gems: u32,
    pub pvp_loss_gems: u32,
    pub pvp_win_xp: u64,
    pub pvp_loss_xp: u64,
    pub bot_easy: BotRewardBand,
    pub bot_medium: BotRewardBand,
    pub bot_hard: BotRewardBand,
    /// Share of the win XP granted on a bot defeat.
    pub bot_loss_xp_fraction: f64,
    /// Must be sorted by ascending `min_score`.
    pub runner_tiers: Vec<RunnerTier>,
    pub runner_daily_gem_cap: u32,
    pub runner_xp_divisor: u64,
    pub runner_xp_cap: u64,
}

impl RewardParams {
    pub const DEFAULT_PVP_WIN_GEMS: u32 = 20;
    pub const DEFAULT_PVP_LOSS_GEMS: u32 = 10;
    pub const DEFAULT_PVP_WIN_XP: u64 = 50;
    pub const DEFAULT_PVP_LOSS_XP: u64 = 10;
    pub const DEFAULT_BOT_EASY: BotRewardBand = BotRewardBand::new(4, 6, 25, 1);
    pub const DEFAULT_BOT_MEDIUM: BotRewardBand = BotRewardBand::new(7, 10, 40, 3);
    pub const DEFAULT_BOT_HARD: BotRewardBand = BotRewardBand::new(11, 14, 60, 5);
    pub const DEFAULT_BOT_LOSS_XP_FRACTION: f64 = 0.25;
    pub const DEFAULT_RUNNER_TIERS: [RunnerTier; 6] = [
        RunnerTier::new(0, 5),
        RunnerTier::new(50, 8),
        RunnerTier::new(100, 12),
        RunnerTier::new(200, 15),
        RunnerTier::new(300, 20),
        RunnerTier::new(500, 25),
    ];
    pub const DEFAULT_RUNNER_DAILY_GEM_CAP: u32 = 50;
    pub const DEFAULT_RUNNER_XP_DIVISOR: u64 = 2;
    pub const DEFAULT_RUNNER_XP_CAP: u64 = 100;

    pub fn bot_band(&self, difficulty: Difficulty) -> &BotRewardBand {
        match difficulty {
            Difficulty::Easy => &self.bot_easy,
            Difficulty::Medium => &self.bot_medium,
            Difficulty::Hard => &self.bot_hard,
        }
    }

    /// Flat gem payout of the highest tier the score reaches.
    pub fn runner_tier_gems(&self, score: u64) -> u32 {
        self.runner_tiers
            .iter()
            .rev()
            .find(|tier| score >= tier.min_score)
            .map(|tier| tier.gems)
            .unwrap_or(0)
    }
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            pvp_win_gems: Self::DEFAULT_PVP_WIN_GEMS,
            pvp_loss_gems: Self::DEFAULT_PVP_LOSS_GEMS,
            pvp_win_xp: Self::DEFAULT_PVP_WIN_XP,
            pvp_loss_xp: Self::DEFAULT_PVP_LOSS_XP,
            bot_easy: Self::DEFAULT_BOT_EASY,
            bot_medium: Self::DEFAULT_BOT_MEDIUM,
            bot_hard: Self::DEFAULT_BOT_HARD,
            bot_loss_xp_fraction: Self::DEFAULT_BOT_LOSS_XP_FRACTION,
            runner_tiers: Self::DEFAULT_RUNNER_TIERS.to_vec(),
            runner_daily_gem_cap: Self::DEFAULT_RUNNER_DAILY_GEM_CAP,
            runner_xp_divisor: Self::DEFAULT_RUNNER_XP_DIVISOR,
            runner_xp_cap: Self::DEFAULT_RUNNER_XP_CAP,
        }
    }
}

/// Energy pool size, regeneration and per-mode entry costs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyParams {
    pub max: u32,
    /// Points restored per whole elapsed minute.
    pub regen_per_minute: u32,
    pub pvp_cost: u32,
    pub bot_cost: u32,
    pub runner_cost: u32,
}

impl EnergyParams {
    pub const DEFAULT_MAX: u32 = 100;
    pub const DEFAULT_REGEN_PER_MINUTE: u32 = 1;
    pub const DEFAULT_PVP_COST: u32 = 20;
    pub const DEFAULT_BOT_COST: u32 = 10;
    pub const DEFAULT_RUNNER_COST: u32 = 5;

    pub fn cost_for(&self, mode: BattleMode) -> u32 {
        match mode {
            BattleMode::Pvp => self.pvp_cost,
            BattleMode::Bot(_) => self.bot_cost,
            BattleMode::Runner => self.runner_cost,
        }
    }
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            max: Self::DEFAULT_MAX,
            regen_per_minute: Self::DEFAULT_REGEN_PER_MINUTE,
            pvp_cost: Self::DEFAULT_PVP_COST,
            bot_cost: Self::DEFAULT_BOT_COST,
            runner_cost: Self::DEFAULT_RUNNER_COST,
        }
    }
}

/// How level-up gems are paid when one grant crosses several levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LevelUpGems {
    /// Only the final level reached pays out (`new_level` gems).
    #[default]
    FinalLevel,
    /// Every level crossed pays its own number.
    EveryLevel,
}

/// XP curve and per-level growth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelingParams {
    /// Highest level of the first band.
    pub early_band_max_level: u32,
    pub early_band_xp: u64,
    pub mid_band_max_level: u32,
    pub mid_band_xp: u64,
    pub late_band_xp: u64,
    /// Added to every stat per level gained.
    pub stat_growth_per_level: u32,
    pub gem_policy: LevelUpGems,
}

impl LevelingParams {
    pub const DEFAULT_EARLY_BAND_MAX_LEVEL: u32 = 10;
    pub const DEFAULT_EARLY_BAND_XP: u64 = 1000;
    pub const DEFAULT_MID_BAND_MAX_LEVEL: u32 = 25;
    pub const DEFAULT_MID_BAND_XP: u64 = 1500;
    pub const DEFAULT_LATE_BAND_XP: u64 = 2500;
    pub const DEFAULT_STAT_GROWTH_PER_LEVEL: u32 = 2;

    /// XP needed to advance from `level` to `level + 1`.
    pub fn xp_required(&self, level: u32) -> u64 {
        if level <= self.early_band_max_level {
            self.early_band_xp
        } else if level <= self.mid_band_max_level {
            self.mid_band_xp
        } else {
            self.late_band_xp
        }
    }
}

impl Default for LevelingParams {
    fn default() -> Self {
        Self {
            early_band_max_level: Self::DEFAULT_EARLY_BAND_MAX_LEVEL,
            early_band_xp: Self::DEFAULT_EARLY_BAND_XP,
            mid_band_max_level: Self::DEFAULT_MID_BAND_MAX_LEVEL,
            mid_band_xp: Self::DEFAULT_MID_BAND_XP,
            late_band_xp: Self::DEFAULT_LATE_BAND_XP,
            stat_growth_per_level: Self::DEFAULT_STAT_GROWTH_PER_LEVEL,
            gem_policy: LevelUpGems::default(),
        }
    }
}

/// Requirements for reaching one evolution tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionStage {
    pub tier: u8,
    pub min_level: u32,
    pub gem_cost: u64,
}

/// Evolution stages and stat boost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionParams {
    pub stages: Vec<EvolutionStage>,
    pub stat_multiplier: f64,
    pub max_tier: u8,
}

impl EvolutionParams {
    pub const DEFAULT_STAGES: [EvolutionStage; 2] = [
        EvolutionStage {
            tier: 2,
            min_level: 16,
            gem_cost: 150,
        },
        EvolutionStage {
            tier: 3,
            min_level: 36,
            gem_cost: 500,
        },
    ];
    pub const DEFAULT_STAT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_MAX_TIER: u8 = 3;

    /// Stage that leads to `tier`, if one is configured.
    pub fn stage_for(&self, tier: u8) -> Option<&EvolutionStage> {
        self.stages.iter().find(|stage| stage.tier == tier)
    }
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            stages: Self::DEFAULT_STAGES.to_vec(),
            stat_multiplier: Self::DEFAULT_STAT_MULTIPLIER,
            max_tier: Self::DEFAULT_MAX_TIER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_tiers_pick_highest_reached() {
        let rewards = RewardParams::default();
        assert_eq!(rewards.runner_tier_gems(0), 5);
        assert_eq!(rewards.runner_tier_gems(49), 5);
        assert_eq!(rewards.runner_tier_gems(50), 8);
        assert_eq!(rewards.runner_tier_gems(199), 12);
        assert_eq!(rewards.runner_tier_gems(300), 20);
        assert_eq!(rewards.runner_tier_gems(5_000), 25);
    }

    #[test]
    fn xp_bands_step_at_band_edges() {
        let leveling = LevelingParams::default();
        assert_eq!(leveling.xp_required(1), 1000);
        assert_eq!(leveling.xp_required(10), 1000);
        assert_eq!(leveling.xp_required(11), 1500);
        assert_eq!(leveling.xp_required(25), 1500);
        assert_eq!(leveling.xp_required(26), 2500);
    }

    #[test]
    fn energy_costs_by_mode() {
        let energy = EnergyParams::default();
        assert_eq!(energy.cost_for(BattleMode::Pvp), 20);
        assert_eq!(energy.cost_for(BattleMode::Bot(Difficulty::Hard)), 10);
        assert_eq!(energy.cost_for(BattleMode::Runner), 5);
    }
}
