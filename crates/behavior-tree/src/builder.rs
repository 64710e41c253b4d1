//! Shorthand constructors for building trees without `Box::new` noise.

use crate::{Behavior, Condition, Draw, Selector, Sequence, WeightedSelector};

/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Shorthand for `Box::new(WeightedSelector::new(options))`.
#[inline]
pub fn weighted<C: Draw + 'static>(
    options: Vec<(Box<dyn Behavior<C>>, u32)>,
) -> Box<dyn Behavior<C>> {
    Box::new(WeightedSelector::new(options))
}

/// Shorthand for `Box::new(Condition::new(predicate))`.
#[inline]
pub fn condition<C: 'static>(
    predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Condition::new(predicate))
}

/// Runs `child` only when `predicate` holds.
#[inline]
pub fn guard<C: 'static>(
    predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
    child: Box<dyn Behavior<C>>,
) -> Box<dyn Behavior<C>> {
    sequence(vec![condition(predicate), child])
}
