//! XP curve.
//!
//! Each level needs a fixed amount of XP determined by its band (1000 through
//! level 10, 1500 through level 25, 2500 after). Thresholds are the running
//! sum, so a pet at level `L` has at least [`xp_for_level`]`(L)` total XP.

use crate::config::{LevelUpGems, LevelingParams};

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_required_for_level(level: u32, params: &LevelingParams) -> u64 {
    params.xp_required(level)
}

/// Total XP at which `level` is reached.
pub fn xp_for_level(level: u32, params: &LevelingParams) -> u64 {
    (1..level).map(|l| params.xp_required(l)).sum()
}

/// Level reached with `total_xp`. Monotonically non-decreasing in XP.
pub fn level_from_xp(total_xp: u64, params: &LevelingParams) -> u32 {
    let mut level = 1;
    let mut remaining = total_xp;

    // Banded part of the curve.
    while level <= params.mid_band_max_level {
        let needed = params.xp_required(level);
        if remaining < needed {
            return level;
        }
        remaining -= needed;
        level += 1;
    }

    // Flat tail: every further level costs the same.
    let per_level = params.late_band_xp.max(1);
    let extra = u32::try_from(remaining / per_level).unwrap_or(u32::MAX);
    level.saturating_add(extra)
}

/// Progress inside one level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpProgress {
    pub current: u64,
    pub needed: u64,
    /// In `[0, 100)` while `current < needed`.
    pub percentage: f64,
}

/// XP earned toward the next level, for a pet at `level` with `total_xp`.
pub fn xp_progress_in_level(total_xp: u64, level: u32, params: &LevelingParams) -> XpProgress {
    let current = total_xp.saturating_sub(xp_for_level(level, params));
    let needed = params.xp_required(level);
    let percentage = if needed == 0 {
        0.0
    } else {
        current as f64 / needed as f64 * 100.0
    };
    XpProgress {
        current,
        needed,
        percentage,
    }
}

/// Outcome of moving a pet from one XP total to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub leveled_up: bool,
    pub old_level: u32,
    pub new_level: u32,
    pub gems_earned: u64,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

/// Detects a level-up between two XP totals and prices it in gems.
///
/// Under [`LevelUpGems::FinalLevel`] a multi-level jump pays only the final
/// level's number; under [`LevelUpGems::EveryLevel`] each level crossed pays.
pub fn process_level_up(old_total_xp: u64, new_total_xp: u64, params: &LevelingParams) -> LevelUp {
    let old_level = level_from_xp(old_total_xp, params);
    let new_level = level_from_xp(new_total_xp, params);

    if new_level <= old_level {
        return LevelUp {
            leveled_up: false,
            old_level,
            new_level: old_level,
            gems_earned: 0,
        };
    }

    let gems_earned = match params.gem_policy {
        LevelUpGems::FinalLevel => u64::from(new_level),
        LevelUpGems::EveryLevel => (old_level + 1..=new_level).map(u64::from).sum(),
    };

    LevelUp {
        leveled_up: true,
        old_level,
        new_level,
        gems_earned,
    }
}
