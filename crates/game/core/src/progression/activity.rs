//! XP earned from logged health activities.
//!
//! These feed the same leveling curve as battle rewards.

/// One day of logged activities.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DailyActivityLog {
    pub steps: u32,
    pub sleep_hours: f64,
    pub water_glasses: u32,
    pub mood_checkins: u32,
    pub healthy_meals: u32,
    pub meditation_minutes: u32,
    pub journaled: bool,
    pub breathing_sessions: u32,
}

/// Per-activity XP breakdown for a day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpGain {
    pub steps: u64,
    pub sleep: u64,
    pub meditation: u64,
    pub meals: u64,
    pub mood: u64,
    pub journal: u64,
    pub breathing: u64,
    pub daily_bonus: u64,
}

impl XpGain {
    pub fn total(&self) -> u64 {
        self.steps
            + self.sleep
            + self.meditation
            + self.meals
            + self.mood
            + self.journal
            + self.breathing
            + self.daily_bonus
    }
}

impl DailyActivityLog {
    pub const STEPS_XP: f64 = 200.0;
    pub const SLEEP_XP: f64 = 150.0;
    pub const MEDITATION_XP: f64 = 100.0;
    pub const MEALS_XP: f64 = 150.0;
    pub const MOOD_XP: f64 = 150.0;
    pub const JOURNAL_XP: u64 = 100;
    pub const BREATHING_XP: u64 = 50;
    pub const DAILY_BONUS_XP: u64 = 200;

    pub const STEPS_GOAL: u32 = 10_000;
    pub const SLEEP_GOAL: f64 = 8.0;
    pub const WATER_GOAL: u32 = 8;
    pub const MOOD_GOAL: u32 = 3;
    pub const MEALS_GOAL: u32 = 3;
    pub const MEDITATION_GOAL: u32 = 10;

    /// True when every tracked activity met its daily goal.
    pub fn all_goals_met(&self) -> bool {
        self.steps >= Self::STEPS_GOAL
            && self.sleep_hours >= Self::SLEEP_GOAL
            && self.water_glasses >= Self::WATER_GOAL
            && self.mood_checkins >= Self::MOOD_GOAL
            && self.healthy_meals >= Self::MEALS_GOAL
            && self.meditation_minutes >= Self::MEDITATION_GOAL
            && self.journaled
            && self.breathing_sessions >= 1
    }

    /// Number of distinct activities logged at all today.
    pub fn activity_count(&self) -> usize {
        [
            self.steps > 0,
            self.sleep_hours > 0.0,
            self.water_glasses > 0,
            self.mood_checkins > 0,
            self.healthy_meals > 0,
            self.meditation_minutes > 0,
            self.journaled,
            self.breathing_sessions > 0,
        ]
        .into_iter()
        .filter(|logged| *logged)
        .count()
    }

    pub fn xp(&self) -> XpGain {
        XpGain {
            steps: proportional(f64::from(self.steps), 10_000.0, Self::STEPS_XP),
            sleep: proportional(self.sleep_hours, 8.0, Self::SLEEP_XP),
            meditation: proportional(f64::from(self.meditation_minutes), 10.0, Self::MEDITATION_XP),
            meals: proportional(f64::from(self.healthy_meals), 3.0, Self::MEALS_XP),
            mood: proportional(f64::from(self.mood_checkins), 3.0, Self::MOOD_XP),
            journal: if self.journaled { Self::JOURNAL_XP } else { 0 },
            breathing: u64::from(self.breathing_sessions) * Self::BREATHING_XP,
            daily_bonus: if self.all_goals_met() {
                Self::DAILY_BONUS_XP
            } else {
                0
            },
        }
    }
}

fn proportional(amount: f64, per: f64, xp: f64) -> u64 {
    let value = (amount / per * xp + 1e-9).floor();
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
