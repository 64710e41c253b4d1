//! Leaf nodes for the opponent trees.

use behavior_tree::{Behavior, Status};

use crate::action::BattleAction;

use super::AiContext;

/// Commits to an action.
pub struct Choose(pub BattleAction);

impl Behavior<AiContext> for Choose {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        ctx.chosen = Some(self.0);
        Status::Success
    }
}

pub fn choose(action: BattleAction) -> Box<dyn Behavior<AiContext>> {
    Box::new(Choose(action))
}
