//! Predicate leaf nodes.

use crate::{Behavior, Status};

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Leaf that succeeds when its predicate holds for the context.
///
/// Conditions only read the context; they never record a decision.
pub struct Condition<C> {
    predicate: Predicate<C>,
}

impl<C> Condition<C> {
    pub fn new(predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hp(u32);

    #[test]
    fn condition_reflects_predicate() {
        let low = Condition::new(|hp: &Hp| hp.0 < 30);

        assert_eq!(low.tick(&mut Hp(10)), Status::Success);
        assert_eq!(low.tick(&mut Hp(30)), Status::Failure);
    }
}
