use behavior_tree::Draw;

use crate::action::BattleAction;
use crate::stats::Combatant;
use crate::traits::{TraitKind, TraitSet};

/// Blackboard for one AI decision.
///
/// Health values are snapshots; the tree never mutates combatants. Leaves
/// record their pick in `chosen`.
#[derive(Clone, Debug, PartialEq)]
pub struct AiContext {
    pub own_health: u32,
    pub own_max_health: u32,
    pub opponent_health: u32,
    pub opponent_max_health: u32,
    /// The deciding side's own turn number, starting at 1.
    pub turn: u32,
    pub traits: TraitSet,
    /// Uniform draw in `[0, 1)` consumed by weighted branches.
    pub roll: f64,
    pub chosen: Option<BattleAction>,
}

impl AiContext {
    pub fn new(
        own: &Combatant,
        opponent: &Combatant,
        turn: u32,
        traits: TraitSet,
        roll: f64,
    ) -> Self {
        Self {
            own_health: own.current_health(),
            own_max_health: own.max_health(),
            opponent_health: opponent.current_health(),
            opponent_max_health: opponent.max_health(),
            turn,
            traits,
            roll,
            chosen: None,
        }
    }

    pub fn own_percent(&self) -> f64 {
        percent(self.own_health, self.own_max_health)
    }

    pub fn opponent_percent(&self) -> f64 {
        percent(self.opponent_health, self.opponent_max_health)
    }

    pub fn has_trait(&self, kind: TraitKind) -> bool {
        self.traits.has(kind)
    }
}

fn percent(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(current) * 100.0 / f64::from(max)
}

impl Draw for AiContext {
    fn draw(&mut self) -> f64 {
        self.roll
    }
}
