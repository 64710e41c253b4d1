//! Complete decision trees per mode.
//!
//! ```text
//! pvp_opponent()
//!   └─ Selector
//!       ├─ own < 30%                   → 60 Defend / 40 Special
//!       ├─ opponent < 0.4 × own (abs)  → 70 Attack / 30 Special
//!       └─ 50 Attack / 30 Special / 20 Defend
//!
//! practice_bot(difficulty)
//!   └─ Selector
//!       ├─ turn 1 and own < 35%        → Defend
//!       └─ difficulty subtree
//! ```
//!
//! Percentages are of each side's own max health. Thresholds are strict.

use behavior_tree::Behavior;
use behavior_tree::builder::{guard, selector, weighted};

use crate::action::{BattleAction, Difficulty};
use crate::traits::TraitKind;

use super::AiContext;
use super::nodes::choose;

pub type BehaviorTree = Box<dyn Behavior<AiContext>>;

use BattleAction::{Attack, Defend, Special};

/// Policy of a generated PvP opponent.
pub fn pvp_opponent() -> BehaviorTree {
    selector(vec![
        guard(
            |ctx: &AiContext| ctx.own_percent() < 30.0,
            weighted(vec![(choose(Defend), 60), (choose(Special), 40)]),
        ),
        guard(
            |ctx: &AiContext| f64::from(ctx.opponent_health) < f64::from(ctx.own_health) * 0.4,
            weighted(vec![(choose(Attack), 70), (choose(Special), 30)]),
        ),
        weighted(vec![
            (choose(Attack), 50),
            (choose(Special), 30),
            (choose(Defend), 20),
        ]),
    ])
}

/// Policy of a practice bot.
pub fn practice_bot(difficulty: Difficulty) -> BehaviorTree {
    let subtree = match difficulty {
        Difficulty::Easy => easy(),
        Difficulty::Medium => medium(),
        Difficulty::Hard => hard(),
    };
    selector(vec![
        guard(
            |ctx: &AiContext| ctx.turn == 1 && ctx.own_percent() < 35.0,
            choose(Defend),
        ),
        subtree,
    ])
}

fn easy() -> BehaviorTree {
    selector(vec![
        guard(
            |ctx: &AiContext| ctx.own_percent() < 20.0,
            weighted(vec![(choose(Defend), 50), (choose(Attack), 50)]),
        ),
        weighted(vec![(choose(Attack), 65), (choose(Special), 35)]),
    ])
}

fn medium() -> BehaviorTree {
    selector(vec![
        guard(
            |ctx: &AiContext| ctx.own_percent() < 30.0 && ctx.opponent_percent() > 60.0,
            weighted(vec![(choose(Defend), 60), (choose(Special), 40)]),
        ),
        guard(|ctx: &AiContext| ctx.opponent_percent() < 35.0, choose(Special)),
        weighted(vec![(choose(Attack), 55), (choose(Special), 45)]),
    ])
}

fn hard() -> BehaviorTree {
    selector(vec![
        guard(
            |ctx: &AiContext| {
                ctx.has_trait(TraitKind::CriticalMaster) && ctx.opponent_percent() < 50.0
            },
            choose(Special),
        ),
        guard(
            |ctx: &AiContext| ctx.own_percent() < 30.0 && ctx.opponent_percent() > 50.0,
            weighted(vec![(choose(Defend), 50), (choose(Special), 50)]),
        ),
        guard(|ctx: &AiContext| ctx.opponent_percent() < 40.0, choose(Special)),
        guard(
            |ctx: &AiContext| ctx.own_percent() > 60.0 && ctx.opponent_percent() > 60.0,
            weighted(vec![(choose(Special), 80), (choose(Attack), 20)]),
        ),
        weighted(vec![(choose(Special), 65), (choose(Attack), 35)]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TraitSet;

    fn ctx(own: u32, opponent: u32, turn: u32, roll: f64) -> AiContext {
        AiContext {
            own_health: own,
            own_max_health: 100,
            opponent_health: opponent,
            opponent_max_health: 100,
            turn,
            traits: TraitSet::empty(),
            roll,
            chosen: None,
        }
    }

    fn run(tree: &BehaviorTree, mut ctx: AiContext) -> Option<BattleAction> {
        tree.tick(&mut ctx);
        ctx.chosen
    }

    #[test]
    fn pvp_low_health_is_defensive() {
        let tree = pvp_opponent();
        assert_eq!(run(&tree, ctx(29, 100, 3, 0.59)), Some(Defend));
        assert_eq!(run(&tree, ctx(29, 100, 3, 0.60)), Some(Special));
    }

    #[test]
    fn pvp_presses_a_weak_opponent() {
        let tree = pvp_opponent();
        // 30 < 80 * 0.4
        assert_eq!(run(&tree, ctx(80, 30, 3, 0.69)), Some(Attack));
        assert_eq!(run(&tree, ctx(80, 30, 3, 0.70)), Some(Special));
        // 32 is not below 32
        assert_eq!(run(&tree, ctx(80, 32, 3, 0.95)), Some(Defend));
    }

    #[test]
    fn pvp_default_split() {
        let tree = pvp_opponent();
        assert_eq!(run(&tree, ctx(90, 90, 2, 0.49)), Some(Attack));
        assert_eq!(run(&tree, ctx(90, 90, 2, 0.79)), Some(Special));
        assert_eq!(run(&tree, ctx(90, 90, 2, 0.80)), Some(Defend));
    }

    #[test]
    fn bots_defend_on_a_bad_first_turn() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let tree = practice_bot(difficulty);
            assert_eq!(run(&tree, ctx(34, 100, 1, 0.0)), Some(Defend));
            assert_ne!(run(&tree, ctx(34, 100, 2, 0.99)), Some(Defend));
        }
    }

    #[test]
    fn easy_bot() {
        let tree = practice_bot(Difficulty::Easy);
        assert_eq!(run(&tree, ctx(19, 100, 4, 0.49)), Some(Defend));
        assert_eq!(run(&tree, ctx(19, 100, 4, 0.50)), Some(Attack));
        assert_eq!(run(&tree, ctx(50, 100, 4, 0.64)), Some(Attack));
        assert_eq!(run(&tree, ctx(50, 100, 4, 0.65)), Some(Special));
    }

    #[test]
    fn medium_bot() {
        let tree = practice_bot(Difficulty::Medium);
        assert_eq!(run(&tree, ctx(25, 70, 4, 0.59)), Some(Defend));
        assert_eq!(run(&tree, ctx(25, 70, 4, 0.60)), Some(Special));
        assert_eq!(run(&tree, ctx(80, 34, 4, 0.0)), Some(Special));
        assert_eq!(run(&tree, ctx(80, 80, 4, 0.54)), Some(Attack));
        assert_eq!(run(&tree, ctx(80, 80, 4, 0.55)), Some(Special));
    }

    #[test]
    fn hard_bot() {
        let tree = practice_bot(Difficulty::Hard);

        let mut crit = ctx(80, 45, 4, 0.99);
        crit.traits = TraitSet::CRITICAL_MASTER;
        assert_eq!(run(&tree, crit), Some(Special));

        assert_eq!(run(&tree, ctx(20, 60, 4, 0.49)), Some(Defend));
        assert_eq!(run(&tree, ctx(20, 60, 4, 0.50)), Some(Special));
        assert_eq!(run(&tree, ctx(50, 39, 4, 0.99)), Some(Special));
        assert_eq!(run(&tree, ctx(70, 70, 4, 0.79)), Some(Special));
        assert_eq!(run(&tree, ctx(70, 70, 4, 0.80)), Some(Attack));
        assert_eq!(run(&tree, ctx(50, 55, 4, 0.64)), Some(Special));
        assert_eq!(run(&tree, ctx(50, 55, 4, 0.65)), Some(Attack));
    }
}
