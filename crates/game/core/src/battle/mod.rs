//! Turn-based battle state machine.
//!
//! `Setup → InProgress → Ended`. [`BattleEngine::start`] evaluates traits and
//! resolves turn order; [`BattleEngine::execute`] resolves one action and
//! strictly alternates the turn; the first combatant at zero health loses.

mod engine;
mod events;
mod state;

pub use engine::{BattleEngine, TurnOutcome};
pub use events::BattleEvent;
pub use state::{BattleState, Fighter, Phase, Side};
