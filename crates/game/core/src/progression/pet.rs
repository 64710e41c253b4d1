//! Pet profile and the progression aggregate.

use tracing::debug;

use crate::config::{BattleConfig, EvolutionParams, LevelingParams};
use crate::error::BattleError;
use crate::reward::RewardResult;
use crate::stats::{Combatant, StatBlock};

use super::leveling::{LevelUp, level_from_xp, process_level_up};

/// A player's pet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PetProfile {
    /// Starter template id the pet was created from.
    pub template: String,
    pub name: String,
    pub level: u32,
    /// Total XP earned over the pet's lifetime.
    pub xp: u64,
    pub tier: u8,
    pub stats: StatBlock,
}

impl PetProfile {
    /// Fresh level-1, tier-1 pet with no XP.
    pub fn new(template: impl Into<String>, name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            template: template.into(),
            name: name.into(),
            level: 1,
            xp: 0,
            tier: 1,
            stats,
        }
    }

    /// Battle-ready view of the pet at full health.
    pub fn combatant(&self) -> Result<Combatant, BattleError> {
        Combatant::new(self.name.clone(), self.level, self.tier, self.stats)
    }
}

/// Pet plus gem balance, threaded explicitly through battle and activity flows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionState {
    pub pet: PetProfile,
    pub gems: u64,
}

impl ProgressionState {
    pub fn new(pet: PetProfile, gems: u64) -> Self {
        Self { pet, gems }
    }

    /// Adds XP, applying level-ups: every stat grows per level gained and
    /// level-up gems are credited.
    pub fn add_xp(&mut self, amount: u64, params: &LevelingParams) -> LevelUp {
        let old_xp = self.pet.xp;
        let new_xp = old_xp.saturating_add(amount);
        self.pet.xp = new_xp;

        let level_up = process_level_up(old_xp, new_xp, params);
        if level_up.leveled_up {
            let gained = level_up.levels_gained();
            self.pet
                .stats
                .grow(params.stat_growth_per_level.saturating_mul(gained));
            self.pet.level = level_up.new_level;
            self.gems = self.gems.saturating_add(level_up.gems_earned);
            debug!(
                pet = %self.pet.name,
                from = level_up.old_level,
                to = level_up.new_level,
                gems = level_up.gems_earned,
                "pet leveled up"
            );
        } else {
            // Keep a stored level consistent with XP even when nothing was crossed.
            self.pet.level = self.pet.level.max(level_from_xp(new_xp, params));
        }
        level_up
    }

    /// Credits gems and returns the new balance.
    pub fn add_gems(&mut self, amount: u64) -> u64 {
        self.gems = self.gems.saturating_add(amount);
        self.gems
    }

    /// Debits gems and returns the new balance, or fails without change.
    pub fn spend_gems(&mut self, amount: u64) -> Result<u64, BattleError> {
        if amount > self.gems {
            return Err(BattleError::InsufficientGems {
                required: amount,
                available: self.gems,
            });
        }
        self.gems -= amount;
        Ok(self.gems)
    }

    /// Applies a battle payout. Gem losses are clamped so the balance never
    /// goes negative.
    pub fn apply_reward(&mut self, reward: &RewardResult, params: &LevelingParams) -> LevelUp {
        if reward.gems >= 0 {
            self.add_gems(reward.gems.unsigned_abs());
        } else {
            self.gems = self.gems.saturating_sub(reward.gems.unsigned_abs());
        }
        self.add_xp(reward.xp, params)
    }

    /// Evolves the pet to its next tier, paying the stage's gem cost and
    /// boosting every stat.
    ///
    /// Returns the new tier.
    pub fn evolve(&mut self, params: &EvolutionParams) -> Result<u8, BattleError> {
        if self.pet.tier >= params.max_tier {
            return Err(BattleError::MaxTierReached {
                max: params.max_tier,
            });
        }
        let next = self.pet.tier + 1;
        let stage = params
            .stage_for(next)
            .ok_or(BattleError::MaxTierReached { max: self.pet.tier })?;

        if self.pet.level < stage.min_level {
            return Err(BattleError::LevelTooLow {
                tier: next,
                required: stage.min_level,
                current: self.pet.level,
            });
        }
        self.spend_gems(stage.gem_cost)?;

        self.pet.stats = self.pet.stats.scaled(params.stat_multiplier);
        self.pet.tier = next;
        debug!(pet = %self.pet.name, tier = next, "pet evolved");
        Ok(next)
    }

    /// Battle-ready view of the current pet.
    pub fn combatant(&self) -> Result<Combatant, BattleError> {
        self.pet.combatant()
    }

    /// Tier the pet could evolve to right now, if any.
    pub fn evolution_ready(&self, config: &BattleConfig) -> Option<u8> {
        let params = &config.evolution;
        if self.pet.tier >= params.max_tier {
            return None;
        }
        let next = self.pet.tier + 1;
        params
            .stage_for(next)
            .filter(|stage| self.pet.level >= stage.min_level && self.gems >= stage.gem_cost)
            .map(|stage| stage.tier)
    }
}
