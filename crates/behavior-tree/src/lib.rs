//! Minimal behavior tree for reactive turn-based opponents.
//!
//! Trees here are evaluated once per turn and complete immediately:
//!
//! - **No Running state**: a node either succeeds or fails on the spot
//! - **Explicit randomness**: weighted choices draw from the context, never
//!   from a global generator, so a seeded context replays identically
//! - **Zero dependencies**: plain Rust
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composites: [`Sequence`], [`Selector`], [`WeightedSelector`]
//! - Leaves: [`Condition`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod condition;
pub mod status;

pub use behavior::{Behavior, Draw};
pub use composite::{Selector, Sequence, WeightedSelector};
pub use condition::Condition;
pub use status::Status;
