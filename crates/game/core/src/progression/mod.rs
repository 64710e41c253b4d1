//! Pet progression: XP curve, level-ups, evolution, energy and activity XP.
//!
//! Progression state is passed explicitly. Nothing here reads a clock or
//! persists; the runtime supplies `now` and saves the results.

pub mod activity;
pub mod energy;
pub mod leveling;
pub mod pet;

pub use activity::{DailyActivityLog, XpGain};
pub use energy::EnergyState;
pub use leveling::{
    LevelUp, XpProgress, level_from_xp, process_level_up, xp_for_level, xp_progress_in_level,
    xp_required_for_level,
};
pub use pet::{PetProfile, ProgressionState};
