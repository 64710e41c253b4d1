use crate::traits::TraitSet;

use super::{BattleState, Side};

/// Something that happened while resolving a battle, in resolution order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BattleEvent {
    Started {
        first: Side,
        player_traits: TraitSet,
        opponent_traits: TraitSet,
    },
    /// Endurance restored health at the start of `side`'s turn.
    Healed { side: Side, amount: u32 },
    Defended { side: Side },
    /// `side` evaded the incoming hit.
    Dodged { side: Side },
    CriticalHit { side: Side },
    Damaged {
        attacker: Side,
        amount: u32,
        /// The target was defending.
        halved: bool,
    },
    /// `side` reflected `amount` back onto its attacker.
    Countered { side: Side, amount: u32 },
    Ended { winner: Side },
}

impl BattleEvent {
    /// One line of battle-log narration.
    pub fn describe(&self, state: &BattleState) -> String {
        let name = |side: Side| state.fighter(side).combatant.name.as_str();
        match self {
            BattleEvent::Started {
                first,
                player_traits,
                opponent_traits,
            } => {
                let list = |traits: &TraitSet| {
                    let names: Vec<&str> = traits.kinds().map(|kind| kind.display_name()).collect();
                    if names.is_empty() {
                        "none".to_string()
                    } else {
                        names.join(", ")
                    }
                };
                format!(
                    "{} vs {}! {} moves first. Traits: {} [{}], {} [{}]",
                    name(Side::Player),
                    name(Side::Opponent),
                    name(*first),
                    name(Side::Player),
                    list(player_traits),
                    name(Side::Opponent),
                    list(opponent_traits),
                )
            }
            BattleEvent::Healed { side, amount } => {
                format!("{}'s Endurance restored {amount} HP", name(*side))
            }
            BattleEvent::Defended { side } => format!("{} braces for impact", name(*side)),
            BattleEvent::Dodged { side } => format!("{} dodged the attack", name(*side)),
            BattleEvent::CriticalHit { side } => {
                format!("Critical Master! {} deals double damage", name(*side))
            }
            BattleEvent::Damaged {
                attacker,
                amount,
                halved,
            } => {
                let suffix = if *halved { " (blocked half)" } else { "" };
                format!(
                    "{} hits {} for {amount} damage{suffix}",
                    name(*attacker),
                    name(attacker.other())
                )
            }
            BattleEvent::Countered { side, amount } => {
                format!("{} countered, reflecting {amount} damage", name(*side))
            }
            BattleEvent::Ended { winner } => format!("{} wins the battle", name(*winner)),
        }
    }
}
