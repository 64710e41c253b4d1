//! Deterministic battle rules for pet combat and progression.
//!
//! `battle-core` decides how a battle action resolves into a damage number, a
//! turn transition, or a match outcome, and how outcomes turn into gems and
//! experience. It performs no I/O: persistence, clocks and entropy are supplied
//! by callers, and every random draw goes through a [`RandomSource`].
//!
//! Control flow for a match:
//! [`generation`] → [`traits`] (both sides) → [`battle::BattleEngine`] driving
//! turns through [`combat`] and, for the non-player side, [`ai`] → on the
//! terminal state [`reward`] computes the payout → [`progression`] applies XP.
pub mod action;
pub mod ai;
pub mod battle;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod generation;
pub mod progression;
pub mod records;
pub mod reward;
pub mod stats;
pub mod traits;

pub use action::{BattleAction, BattleMode, CombatMode, Difficulty};
pub use ai::{AiContext, Strategy, select_action};
pub use battle::{BattleEngine, BattleEvent, BattleState, Fighter, Phase, Side, TurnOutcome};
pub use combat::{DamageRoll, compute_damage};
pub use config::{
    BattleConfig, BotRewardBand, CombatParams, EnergyParams, EvolutionParams, GeneratorParams,
    LevelUpGems, LevelingParams, RewardParams, RunnerTier, TraitParams,
};
pub use env::{PcgRng, RandomSource, SequenceRng};
pub use error::{BattleError, ErrorSeverity};
pub use generation::{create_bot_opponent, generate_opponent};
pub use progression::{
    DailyActivityLog, EnergyState, LevelUp, PetProfile, ProgressionState, XpGain, XpProgress,
    level_from_xp, process_level_up, xp_for_level, xp_progress_in_level,
};
pub use records::{BattleRecord, BotRecord, RunnerRecord, WinLoss};
pub use reward::{BattleOutcome, MatchResult, RewardResult, compute_reward};
pub use stats::{Combatant, StatBlock, StatKind};
pub use traits::{TraitKind, TraitSet, TraitSpec, evaluate_traits};
