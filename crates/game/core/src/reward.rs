//! Battle payouts.
//!
//! Maps a finished match to gems and XP. Gem losses are reported as negative
//! amounts already clamped to the balance the caller passed in; the runner's
//! daily cap is reported through [`RewardResult::daily_limit_reached`] rather
//! than as an error.

use crate::action::Difficulty;
use crate::config::RewardParams;
use crate::env::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    pub const fn is_victory(self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }
}

/// A finished match as seen by the reward calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchResult {
    Pvp {
        outcome: BattleOutcome,
        current_gems: u64,
    },
    Bot {
        difficulty: Difficulty,
        outcome: BattleOutcome,
        current_gems: u64,
    },
    Runner {
        score: u64,
        /// Runner gems already earned today, before this run.
        gems_earned_today: u32,
    },
}

/// Payout for one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardResult {
    /// Negative on a loss penalty.
    pub gems: i64,
    pub xp: u64,
    /// Runner only: the tier award was reduced (possibly to zero) by the daily cap.
    pub daily_limit_reached: bool,
}

impl RewardResult {
    fn gain(gems: u64, xp: u64) -> Self {
        Self {
            gems: i64::try_from(gems).unwrap_or(i64::MAX),
            xp,
            daily_limit_reached: false,
        }
    }

    fn loss(penalty: u64, balance: u64, xp: u64) -> Self {
        let lost = penalty.min(balance);
        Self {
            gems: -i64::try_from(lost).unwrap_or(i64::MAX),
            xp,
            daily_limit_reached: false,
        }
    }
}

/// Computes the payout for a finished match.
///
/// Only a bot victory draws from `rng` (one draw for the gem amount).
pub fn compute_reward(
    result: MatchResult,
    params: &RewardParams,
    rng: &mut impl RandomSource,
) -> RewardResult {
    match result {
        MatchResult::Pvp {
            outcome: BattleOutcome::Victory,
            ..
        } => RewardResult::gain(u64::from(params.pvp_win_gems), params.pvp_win_xp),
        MatchResult::Pvp {
            outcome: BattleOutcome::Defeat,
            current_gems,
        } => RewardResult::loss(u64::from(params.pvp_loss_gems), current_gems, params.pvp_loss_xp),
        MatchResult::Bot {
            difficulty,
            outcome,
            current_gems,
        } => {
            let band = params.bot_band(difficulty);
            match outcome {
                BattleOutcome::Victory => {
                    let gems = rng.range_inclusive(
                        i64::from(band.win_gems_min),
                        i64::from(band.win_gems_max),
                    );
                    RewardResult::gain(gems.max(0).unsigned_abs(), band.win_xp)
                }
                BattleOutcome::Defeat => {
                    let xp = (band.win_xp as f64 * params.bot_loss_xp_fraction).floor() as u64;
                    RewardResult::loss(u64::from(band.loss_gems), current_gems, xp)
                }
            }
        }
        MatchResult::Runner {
            score,
            gems_earned_today,
        } => runner_reward(score, gems_earned_today, params),
    }
}

fn runner_reward(score: u64, gems_earned_today: u32, params: &RewardParams) -> RewardResult {
    let xp = (score / params.runner_xp_divisor.max(1)).min(params.runner_xp_cap);
    let tier_gems = params.runner_tier_gems(score);
    let headroom = params.runner_daily_gem_cap.saturating_sub(gems_earned_today);
    let gems = tier_gems.min(headroom);

    RewardResult {
        gems: i64::from(gems),
        xp,
        daily_limit_reached: gems < tier_gems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};

    fn runner(score: u64, today: u32) -> RewardResult {
        compute_reward(
            MatchResult::Runner {
                score,
                gems_earned_today: today,
            },
            &RewardParams::default(),
            &mut SequenceRng::constant(0.0),
        )
    }

    #[test]
    fn runner_tiers_and_xp() {
        assert_eq!(runner(0, 0), RewardResult { gems: 5, xp: 0, daily_limit_reached: false });
        assert_eq!(runner(75, 0).gems, 8);
        assert_eq!(runner(75, 0).xp, 37);
        assert_eq!(runner(500, 0).gems, 25);
        assert_eq!(runner(500, 0).xp, 100);
    }

    #[test]
    fn runner_cap_clamps_then_zeroes() {
        let clamped = runner(500, 40);
        assert_eq!(clamped.gems, 10);
        assert!(clamped.daily_limit_reached);

        let capped = runner(500, 50);
        assert_eq!(capped.gems, 0);
        assert_eq!(capped.xp, 100);
        assert!(capped.daily_limit_reached);
    }

    #[test]
    fn runner_daily_total_never_exceeds_cap() {
        let mut today = 0;
        for score in [600, 10, 350, 120, 999, 0, 75, 500] {
            let reward = runner(score, today);
            today += reward.gems as u32;
        }
        assert_eq!(today, 50);
    }

    #[test]
    fn bot_victory_gems_within_band() {
        let params = RewardParams::default();
        let mut rng = PcgRng::new(5);
        for (difficulty, low, high, xp) in [
            (Difficulty::Easy, 4, 6, 25),
            (Difficulty::Medium, 7, 10, 40),
            (Difficulty::Hard, 11, 14, 60),
        ] {
            for _ in 0..200 {
                let reward = compute_reward(
                    MatchResult::Bot {
                        difficulty,
                        outcome: BattleOutcome::Victory,
                        current_gems: 0,
                    },
                    &params,
                    &mut rng,
                );
                assert!((low..=high).contains(&reward.gems));
                assert_eq!(reward.xp, xp);
            }
        }
    }

    #[test]
    fn bot_defeat_is_small_penalty_and_quarter_xp() {
        let params = RewardParams::default();
        let reward = compute_reward(
            MatchResult::Bot {
                difficulty: Difficulty::Hard,
                outcome: BattleOutcome::Defeat,
                current_gems: 100,
            },
            &params,
            &mut SequenceRng::constant(0.0),
        );
        assert_eq!(reward.gems, -5);
        assert_eq!(reward.xp, 15);
    }

    #[test]
    fn pvp_loss_never_exceeds_balance() {
        let params = RewardParams::default();
        for balance in [0_u64, 3, 10, 250] {
            let reward = compute_reward(
                MatchResult::Pvp {
                    outcome: BattleOutcome::Defeat,
                    current_gems: balance,
                },
                &params,
                &mut SequenceRng::constant(0.0),
            );
            let new_balance = balance as i64 + reward.gems;
            assert_eq!(new_balance, balance.saturating_sub(10) as i64);
            assert!(new_balance >= 0);
        }
    }

    #[test]
    fn pvp_victory_is_fixed() {
        let reward = compute_reward(
            MatchResult::Pvp {
                outcome: BattleOutcome::Victory,
                current_gems: 0,
            },
            &RewardParams::default(),
            &mut SequenceRng::constant(0.9),
        );
        assert_eq!(reward, RewardResult { gems: 20, xp: 50, daily_limit_reached: false });
    }
}
