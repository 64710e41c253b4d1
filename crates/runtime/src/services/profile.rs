use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use battle_core::{
    BattleError, EnergyParams, EnergyState, LevelUp, LevelingParams, PetProfile, ProgressionState,
};

use crate::api::{Result, RuntimeError};
use crate::repository::{KeyValueStore, load_json, save_json};

const PET_KEY: &str = "pet";
const GEMS_KEY: &str = "gems";
const ENERGY_KEY: &str = "energy";

/// Pet, gem balance and energy pool.
///
/// Gems live under their own key, so a progression save is two writes.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn KeyValueStore>,
    leveling: LevelingParams,
}

impl ProfileService {
    pub fn new(store: Arc<dyn KeyValueStore>, leveling: LevelingParams) -> Self {
        Self { store, leveling }
    }

    pub fn load_pet(&self) -> Result<Option<PetProfile>> {
        Ok(load_json(self.store.as_ref(), PET_KEY)?)
    }

    pub fn save_pet(&self, pet: &PetProfile) -> Result<()> {
        Ok(save_json(self.store.as_ref(), PET_KEY, pet)?)
    }

    pub fn gems(&self) -> Result<u64> {
        Ok(load_json(self.store.as_ref(), GEMS_KEY)?.unwrap_or(0))
    }

    fn save_gems(&self, gems: u64) -> Result<()> {
        Ok(save_json(self.store.as_ref(), GEMS_KEY, &gems)?)
    }

    /// Returns the new balance.
    pub fn add_gems(&self, amount: u64) -> Result<u64> {
        let balance = self.gems()?.saturating_add(amount);
        self.save_gems(balance)?;
        Ok(balance)
    }

    /// Returns the new balance; the stored balance is untouched when short.
    pub fn spend_gems(&self, amount: u64) -> Result<u64> {
        let available = self.gems()?;
        if available < amount {
            return Err(BattleError::InsufficientGems {
                required: amount,
                available,
            }
            .into());
        }
        let balance = available - amount;
        self.save_gems(balance)?;
        Ok(balance)
    }

    /// Credits XP to the stored pet, applying level-ups and their gems.
    pub fn add_xp(&self, amount: u64) -> Result<LevelUp> {
        let mut progression = self.progression()?;
        let level_up = progression.add_xp(amount, &self.leveling);
        self.save_progression(&progression)?;
        Ok(level_up)
    }

    pub fn progression(&self) -> Result<ProgressionState> {
        let pet = self.load_pet()?.ok_or(RuntimeError::NoActivePet)?;
        Ok(ProgressionState::new(pet, self.gems()?))
    }

    pub fn save_progression(&self, progression: &ProgressionState) -> Result<()> {
        self.save_pet(&progression.pet)?;
        self.save_gems(progression.gems)
    }

    /// Stored energy brought up to `now`, or a full pool for a new player.
    /// Not written back; see [`Self::save_energy`].
    pub fn energy(&self, now: DateTime<Utc>, params: &EnergyParams) -> Result<EnergyState> {
        let stored: Option<EnergyState> = load_json(self.store.as_ref(), ENERGY_KEY)?;
        let mut energy = stored.unwrap_or_else(|| EnergyState::full(params, now));
        let restored = energy.regenerate(now, params);
        if restored > 0 {
            debug!(restored, current = energy.current, "energy regenerated");
        }
        Ok(energy)
    }

    pub fn save_energy(&self, energy: &EnergyState) -> Result<()> {
        Ok(save_json(self.store.as_ref(), ENERGY_KEY, energy)?)
    }
}
