//! Typed access to the persisted aggregates.
//!
//! | key            | document                      |
//! |----------------|-------------------------------|
//! | `pet`          | [`battle_core::PetProfile`]   |
//! | `gems`         | gem balance                   |
//! | `energy`       | [`battle_core::EnergyState`]  |
//! | `battle_stats` | [`battle_core::BattleRecord`] |
mod profile;
mod stats;

pub use profile::ProfileService;
pub use stats::BattleStatsRepository;
