//! Pet attributes and in-battle combatants.
//!
//! [`StatBlock`] is the single source of truth for a pet's seven attributes.
//! [`Combatant`] wraps a stat block with the health meter used during a battle.

pub mod combatant;
pub mod core;

pub use combatant::Combatant;
pub use core::{StatBlock, StatKind};
