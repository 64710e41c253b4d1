//! Core behavior trait.

use crate::Status;

/// A behavior tree node evaluated against a context (the blackboard).
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node. Leaves may write their decision into `ctx`.
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Contexts that can feed uniform draws to [`crate::WeightedSelector`].
pub trait Draw {
    /// Returns a uniform value in `[0, 1)`.
    fn draw(&mut self) -> f64;
}
