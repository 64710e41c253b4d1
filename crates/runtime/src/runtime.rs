//! High-level runtime orchestrator.
//!
//! The runtime owns the battle config, the starter catalog, the seeded RNG and
//! the storage-backed services, and exposes a builder-based API for clients to
//! create pets and play matches.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use battle_content::StarterCatalog;
use battle_core::{
    BattleAction, BattleConfig, BattleMode, BattleRecord, CombatMode, DailyActivityLog,
    EnergyState, LevelUp, MatchResult, PcgRng, ProgressionState, TurnOutcome, compute_reward,
    create_bot_opponent, generate_opponent,
};

use crate::api::{Result, RuntimeError};
use crate::repository::{InMemoryStore, KeyValueStore};
use crate::services::{BattleStatsRepository, ProfileService};
use crate::session::{BattleSession, Settlement};

/// Runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    /// Fixed RNG seed for reproducible play; random when unset.
    pub seed: Option<u64>,
}

/// Main runtime that orchestrates battles for one player.
pub struct Runtime {
    config: BattleConfig,
    catalog: StarterCatalog,
    profile: ProfileService,
    stats: BattleStatsRepository,
    rng: PcgRng,
    run_started: Option<DateTime<Utc>>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StarterCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn stats(&self) -> &BattleStatsRepository {
        &self.stats
    }

    /// Replaces the stored pet with a fresh one from a starter template and
    /// refills energy. The gem balance carries over.
    pub fn create_pet(
        &mut self,
        template_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ProgressionState> {
        let pet = self.catalog.create_pet(template_id)?;
        self.profile.save_pet(&pet)?;
        self.profile
            .save_energy(&EnergyState::full(&self.config.energy, now))?;
        info!(template = %pet.template, name = %pet.name, "created pet");
        self.profile.progression()
    }

    pub fn progression(&self) -> Result<ProgressionState> {
        self.profile.progression()
    }

    pub fn battle_stats(&self) -> Result<BattleRecord> {
        Ok(self.stats.get_battle_stats()?)
    }

    /// Energy as of `now`, with regeneration written back.
    pub fn energy(&self, now: DateTime<Utc>) -> Result<EnergyState> {
        let energy = self.profile.energy(now, &self.config.energy)?;
        self.profile.save_energy(&energy)?;
        Ok(energy)
    }

    /// Pays the mode's energy fee, generates the opponent and resolves turn
    /// order.
    ///
    /// The pet is validated before any energy is spent.
    pub fn start_battle(&mut self, mode: BattleMode, now: DateTime<Utc>) -> Result<BattleSession> {
        let combat_mode = match mode {
            BattleMode::Pvp => CombatMode::Pvp,
            BattleMode::Bot(difficulty) => CombatMode::Bot(difficulty),
            BattleMode::Runner => {
                return Err(RuntimeError::ModeMismatch {
                    expected: "turn-based battle",
                    found: mode,
                });
            }
        };
        if self.run_started.is_some() {
            return Err(RuntimeError::BattleInProgress);
        }

        let progression = self.profile.progression()?;
        let player = progression.combatant()?;
        let opponent = match combat_mode {
            CombatMode::Pvp => generate_opponent(&progression.pet, &self.config, &mut self.rng)?,
            CombatMode::Bot(difficulty) => {
                create_bot_opponent(difficulty, &progression.pet, &self.config, &mut self.rng)?
            }
        };

        let mut energy = self.profile.energy(now, &self.config.energy)?;
        energy.consume_for(mode, &self.config.energy)?;
        self.profile.save_energy(&energy)?;

        let mut session = BattleSession::new(combat_mode, player, opponent);
        session.start(&self.config, &mut self.rng)?;
        info!(
            %mode,
            opponent = %session.state().opponent.combatant.name,
            opponent_level = session.state().opponent.combatant.level,
            energy = energy.current,
            "battle started"
        );
        Ok(session)
    }

    pub fn player_action(
        &mut self,
        session: &mut BattleSession,
        action: BattleAction,
    ) -> Result<TurnOutcome> {
        Ok(session.player_action(action, &self.config, &mut self.rng)?)
    }

    pub fn opponent_turn(&mut self, session: &mut BattleSession) -> Result<TurnOutcome> {
        Ok(session.opponent_turn(&self.config, &mut self.rng)?)
    }

    /// Lets the AI play whichever side is due.
    pub fn autoplay_turn(&mut self, session: &mut BattleSession) -> Result<TurnOutcome> {
        Ok(session.autoplay_turn(&self.config, &mut self.rng)?)
    }

    /// Computes and applies the reward for an ended battle, then records the
    /// result.
    ///
    /// Returns [`RuntimeError::BattleInProgress`] while the battle is still
    /// running; the session stays with the caller and can be played on.
    ///
    /// Write failures after the reward is computed are logged and reported
    /// through [`Settlement::persisted`] instead of failing the call.
    pub fn finish_battle(&mut self, session: &BattleSession) -> Result<Settlement> {
        let outcome = session.outcome().ok_or(RuntimeError::BattleInProgress)?;
        let mut progression = self.profile.progression()?;

        let result = match session.mode() {
            CombatMode::Pvp => MatchResult::Pvp {
                outcome,
                current_gems: progression.gems,
            },
            CombatMode::Bot(difficulty) => MatchResult::Bot {
                difficulty,
                outcome,
                current_gems: progression.gems,
            },
        };
        let reward = compute_reward(result, &self.config.rewards, &mut self.rng);
        let level_up = progression.apply_reward(&reward, &self.config.leveling);

        let mut persisted = self.persist_progression(&progression);
        persisted &= self.persist_stats(|record| record.record_combat(session.mode(), outcome));

        info!(
            mode = %BattleMode::from(session.mode()),
            ?outcome,
            gems = reward.gems,
            xp = reward.xp,
            level = progression.pet.level,
            persisted,
            "battle settled"
        );
        Ok(Settlement {
            outcome: Some(outcome),
            reward,
            level_up,
            new_high_score: false,
            persisted,
        })
    }

    /// Abandons a battle. Nothing is paid out or recorded; the energy fee
    /// stays spent.
    pub fn forfeit(&self, session: BattleSession) {
        info!(
            mode = %BattleMode::from(session.mode()),
            turn = session.state().turn_count,
            "battle forfeited"
        );
    }

    /// Pays the runner energy fee. The run itself is played elsewhere and
    /// reported back through [`Self::finish_run`].
    pub fn start_run(&mut self, now: DateTime<Utc>) -> Result<EnergyState> {
        if self.run_started.is_some() {
            return Err(RuntimeError::BattleInProgress);
        }
        self.profile.progression()?;

        let mut energy = self.profile.energy(now, &self.config.energy)?;
        energy.consume_for(BattleMode::Runner, &self.config.energy)?;
        self.profile.save_energy(&energy)?;

        self.run_started = Some(now);
        info!(energy = energy.current, "runner started");
        Ok(energy)
    }

    /// Settles the active run's score against today's runner gem cap.
    pub fn finish_run(&mut self, score: u64, now: DateTime<Utc>) -> Result<Settlement> {
        if self.run_started.take().is_none() {
            return Err(RuntimeError::NoActiveBattle);
        }
        let today = now.date_naive();
        let mut record = self.stats.get_battle_stats()?;
        let mut progression = self.profile.progression()?;

        let result = MatchResult::Runner {
            score,
            gems_earned_today: record.runner_gems_today(today),
        };
        let reward = compute_reward(result, &self.config.rewards, &mut self.rng);
        let level_up = progression.apply_reward(&reward, &self.config.leveling);
        let gems = u32::try_from(reward.gems.max(0)).unwrap_or(u32::MAX);
        let new_high_score = record.record_run(score, gems, today);

        let mut persisted = self.persist_progression(&progression);
        if let Err(err) = self.stats.save_battle_stats(&record) {
            warn!(%err, "failed to save battle stats; results may not have saved");
            persisted = false;
        }

        info!(
            score,
            gems = reward.gems,
            xp = reward.xp,
            daily_limit_reached = reward.daily_limit_reached,
            new_high_score,
            persisted,
            "run settled"
        );
        Ok(Settlement {
            outcome: None,
            reward,
            level_up,
            new_high_score,
            persisted,
        })
    }

    /// Credits XP earned from a day's health activities.
    pub fn log_activity(&mut self, log: &DailyActivityLog) -> Result<LevelUp> {
        let gain = log.xp();
        let level_up = self.profile.add_xp(gain.total())?;
        info!(xp = gain.total(), level = level_up.new_level, "activity logged");
        Ok(level_up)
    }

    /// Evolves the pet to its next tier. Returns the new tier.
    pub fn evolve(&mut self) -> Result<u8> {
        let mut progression = self.profile.progression()?;
        let tier = progression.evolve(&self.config.evolution)?;
        self.profile.save_progression(&progression)?;
        info!(tier, gems = progression.gems, "pet evolved");
        Ok(tier)
    }

    fn persist_progression(&self, progression: &ProgressionState) -> bool {
        match self.profile.save_progression(progression) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "failed to save pet progress; results may not have saved");
                false
            }
        }
    }

    fn persist_stats(&self, update: impl FnOnce(&mut BattleRecord)) -> bool {
        let saved = self.stats.get_battle_stats().and_then(|mut record| {
            update(&mut record);
            self.stats.save_battle_stats(&record)
        });
        match saved {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "failed to save battle stats; results may not have saved");
                false
            }
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: StarterCatalog,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: StarterCatalog::builtin(),
            store: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_config(mut self, battle_config: BattleConfig) -> Self {
        self.config.battle_config = battle_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn catalog(mut self, catalog: StarterCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Storage for the persisted aggregates. Defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Runtime {
        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Arc::new(InMemoryStore::new()),
        };
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let battle_config = self.config.battle_config;

        Runtime {
            profile: ProfileService::new(Arc::clone(&store), battle_config.leveling.clone()),
            stats: BattleStatsRepository::new(store),
            config: battle_config,
            catalog: self.catalog,
            rng: PcgRng::new(seed),
            run_started: None,
        }
    }
}
