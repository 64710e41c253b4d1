use crate::action::CombatMode;
use crate::reward::BattleOutcome;
use crate::stats::Combatant;
use crate::traits::TraitSet;

/// Which side of the encounter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// Combatants known; traits and turn order not yet resolved.
    Setup,
    InProgress,
    Ended { winner: Side },
}

/// One side of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub combatant: Combatant,
    /// Fixed at battle start.
    pub traits: TraitSet,
    /// Set by Defend; cleared when this side acts again.
    pub defending: bool,
    pub actions_taken: u32,
}

impl Fighter {
    pub fn new(combatant: Combatant) -> Self {
        Self {
            combatant,
            traits: TraitSet::empty(),
            defending: false,
            actions_taken: 0,
        }
    }
}

/// Per-encounter state, exclusively owned by one match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub mode: CombatMode,
    pub player: Fighter,
    pub opponent: Fighter,
    /// Side whose action is expected next.
    pub turn: Side,
    /// 1-based count of the action about to resolve; 0 before start.
    pub turn_count: u32,
    pub phase: Phase,
}

impl BattleState {
    pub fn new(mode: CombatMode, player: Combatant, opponent: Combatant) -> Self {
        Self {
            mode,
            player: Fighter::new(player),
            opponent: Fighter::new(opponent),
            turn: Side::Player,
            turn_count: 0,
            phase: Phase::Setup,
        }
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Mutable `(actor, defender)` pair for `side` acting.
    pub(crate) fn pair_mut(&mut self, side: Side) -> (&mut Fighter, &mut Fighter) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Ended { winner } => Some(winner),
            _ => None,
        }
    }

    /// Result from the player's point of view, once ended.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.winner().map(|winner| match winner {
            Side::Player => BattleOutcome::Victory,
            Side::Opponent => BattleOutcome::Defeat,
        })
    }
}
