//! Opponent move selection.
//!
//! Each mode has a reactive behavior tree (see [`presets`]) evaluated once per
//! turn against an [`AiContext`]. There is no look-ahead: the tree reads
//! health ratios, the turn number and active traits, and weighted branches
//! resolve against a single uniform draw taken before evaluation.

pub mod context;
pub mod nodes;
pub mod presets;

pub use context::AiContext;
pub use presets::BehaviorTree;

use behavior_tree::Behavior;
use tracing::debug;

use crate::action::{BattleAction, CombatMode};
use crate::env::RandomSource;
use crate::stats::Combatant;
use crate::traits::TraitSet;

/// A mode's decision tree, built once and reused for every turn of a battle.
pub struct Strategy {
    mode: CombatMode,
    tree: BehaviorTree,
}

impl Strategy {
    pub fn for_mode(mode: CombatMode) -> Self {
        let tree = match mode {
            CombatMode::Pvp => presets::pvp_opponent(),
            CombatMode::Bot(difficulty) => presets::practice_bot(difficulty),
        };
        Self { mode, tree }
    }

    pub fn mode(&self) -> CombatMode {
        self.mode
    }

    /// Evaluates the tree. Falls back to Attack if no branch chose.
    pub fn decide(&self, ctx: &mut AiContext) -> BattleAction {
        self.tree.tick(ctx);
        let action = ctx.chosen.unwrap_or(BattleAction::Attack);
        debug!(
            mode = ?self.mode,
            own_pct = ctx.own_percent(),
            opponent_pct = ctx.opponent_percent(),
            turn = ctx.turn,
            roll = ctx.roll,
            %action,
            "ai selected action"
        );
        action
    }

    /// Chooses the action for `own` against `opponent`, drawing exactly once.
    pub fn select(
        &self,
        own: &Combatant,
        opponent: &Combatant,
        turn: u32,
        own_traits: TraitSet,
        rng: &mut impl RandomSource,
    ) -> BattleAction {
        let mut ctx = AiContext::new(own, opponent, turn, own_traits, rng.next_f64());
        self.decide(&mut ctx)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("mode", &self.mode).finish()
    }
}

/// One-shot selection for callers without a cached [`Strategy`].
pub fn select_action(
    own: &Combatant,
    opponent: &Combatant,
    turn: u32,
    own_traits: TraitSet,
    mode: CombatMode,
    rng: &mut impl RandomSource,
) -> BattleAction {
    Strategy::for_mode(mode).select(own, opponent, turn, own_traits, rng)
}
