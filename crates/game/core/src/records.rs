//! Persistent win/loss and runner counters.

use chrono::NaiveDate;

use crate::action::{CombatMode, Difficulty};
use crate::reward::BattleOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    pub fn record(&mut self, outcome: BattleOutcome) {
        match outcome {
            BattleOutcome::Victory => self.wins = self.wins.saturating_add(1),
            BattleOutcome::Defeat => self.losses = self.losses.saturating_add(1),
        }
    }

    pub fn total(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotRecord {
    pub easy: WinLoss,
    pub medium: WinLoss,
    pub hard: WinLoss,
}

impl BotRecord {
    pub fn get(&self, difficulty: Difficulty) -> &WinLoss {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut WinLoss {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Runner counters. `today_gems` belongs to `day` and resets on rollover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RunnerRecord {
    pub high_score: u64,
    pub total_runs: u32,
    pub today_gems: u32,
    pub day: Option<NaiveDate>,
}

/// The `battle_stats` aggregate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRecord {
    pub pvp: WinLoss,
    pub bot: BotRecord,
    pub runner: RunnerRecord,
}

impl BattleRecord {
    pub fn record_combat(&mut self, mode: CombatMode, outcome: BattleOutcome) {
        match mode {
            CombatMode::Pvp => self.pvp.record(outcome),
            CombatMode::Bot(difficulty) => self.bot.get_mut(difficulty).record(outcome),
        }
    }

    /// Resets the daily runner gem counter when `today` is a new day.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.runner.day != Some(today) {
            self.runner.today_gems = 0;
            self.runner.day = Some(today);
        }
    }

    /// Runner gems already earned on `today`.
    pub fn runner_gems_today(&self, today: NaiveDate) -> u32 {
        if self.runner.day == Some(today) {
            self.runner.today_gems
        } else {
            0
        }
    }

    /// Records a finished run. Returns true on a new high score.
    pub fn record_run(&mut self, score: u64, gems: u32, today: NaiveDate) -> bool {
        self.roll_over(today);
        let new_record = score > self.runner.high_score;
        self.runner.high_score = self.runner.high_score.max(score);
        self.runner.total_runs = self.runner.total_runs.saturating_add(1);
        self.runner.today_gems = self.runner.today_gems.saturating_add(gems);
        new_record
    }
}
