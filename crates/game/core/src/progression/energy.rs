//! Energy gating for paid battle modes.

use chrono::{DateTime, TimeDelta, Utc};

use crate::action::BattleMode;
use crate::config::EnergyParams;
use crate::error::BattleError;

/// Energy pool with time-based regeneration.
///
/// `last_update` marks the instant regeneration was last accounted for;
/// partial minutes carry over to the next call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyState {
    pub current: u32,
    pub max: u32,
    pub last_update: DateTime<Utc>,
}

impl EnergyState {
    /// Full pool as of `now`.
    pub fn full(params: &EnergyParams, now: DateTime<Utc>) -> Self {
        Self {
            current: params.max,
            max: params.max,
            last_update: now,
        }
    }

    /// Credits whole elapsed minutes since the last update. Returns the
    /// amount restored.
    pub fn regenerate(&mut self, now: DateTime<Utc>, params: &EnergyParams) -> u32 {
        let minutes = (now - self.last_update).num_minutes();
        if minutes <= 0 {
            return 0;
        }
        if self.current >= self.max {
            self.last_update = now;
            return 0;
        }

        let minutes_u32 = u32::try_from(minutes).unwrap_or(u32::MAX);
        let gained = minutes_u32.saturating_mul(params.regen_per_minute);
        let before = self.current;
        self.current = self.current.saturating_add(gained).min(self.max);

        if self.current == self.max {
            self.last_update = now;
        } else {
            self.last_update += TimeDelta::minutes(minutes);
        }
        self.current - before
    }

    pub fn has_enough(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Spends `cost`, returning what is left. Fails without change when short.
    pub fn consume(&mut self, cost: u32) -> Result<u32, BattleError> {
        if !self.has_enough(cost) {
            return Err(BattleError::InsufficientEnergy {
                required: cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(self.current)
    }

    /// Spends the entry cost of `mode`.
    pub fn consume_for(
        &mut self,
        mode: BattleMode,
        params: &EnergyParams,
    ) -> Result<u32, BattleError> {
        self.consume(params.cost_for(mode))
    }

    /// Restores energy from an item or reward, capped at max.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}
