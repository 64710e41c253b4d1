//! Composite behavior nodes.
//!
//! [`Sequence`] is a short-circuiting AND, [`Selector`] a short-circuiting OR,
//! and [`WeightedSelector`] a single random pick among weighted children.

use crate::{Behavior, Draw, Status};

/// Evaluates children left to right until one fails.
///
/// Returns `Failure` at the first failing child, `Success` if all succeed.
/// The usual shape is `[condition, ..., decision]`: the decision only runs
/// once every guard in front of it passed.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Evaluates children left to right until one succeeds.
///
/// Branch order is priority order: the first branch whose guards pass wins.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

/// Picks exactly one child with probability proportional to its weight.
///
/// One draw is taken from the context per tick. Children are laid out on
/// `[0, total)` in declaration order, so `[(a, 60), (b, 40)]` runs `a` for
/// draws below 0.6 and `b` otherwise. Zero-weight children are never picked.
pub struct WeightedSelector<C> {
    options: Vec<(Box<dyn Behavior<C>>, u32)>,
    total: u32,
}

impl<C> WeightedSelector<C> {
    /// # Panics
    ///
    /// Panics if `options` is empty or every weight is zero.
    pub fn new(options: Vec<(Box<dyn Behavior<C>>, u32)>) -> Self {
        let total: u32 = options.iter().map(|(_, weight)| *weight).sum();
        assert!(
            total > 0,
            "WeightedSelector must have at least one positive weight"
        );
        Self { options, total }
    }
}

impl<C: Draw> Behavior<C> for WeightedSelector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let roll = ctx.draw() * f64::from(self.total);
        let mut upper = 0.0;
        for (child, weight) in &self.options {
            if *weight == 0 {
                continue;
            }
            upper += f64::from(*weight);
            if roll < upper {
                return child.tick(ctx);
            }
        }

        // Draws are in [0, 1), so this is only reachable through rounding at
        // the top edge; fall back to the last weighted child.
        match self.options.iter().rev().find(|(_, weight)| *weight > 0) {
            Some((child, _)) => child.tick(ctx),
            None => Status::Failure,
        }
    }
}
