//! Passive combat traits.
//!
//! Traits are evaluated once per battle from static stats and never change
//! mid-battle. Their effects may roll at resolution time; evaluation itself is
//! pure.

use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::config::TraitParams;
use crate::stats::{StatBlock, StatKind};

/// Catalog entry identifier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TraitKind {
    FirstStrike,
    Endurance,
    Counter,
    CriticalMaster,
}

impl TraitKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            TraitKind::FirstStrike => "First Strike",
            TraitKind::Endurance => "Endurance",
            TraitKind::Counter => "Counter",
            TraitKind::CriticalMaster => "Critical Master",
        }
    }

    pub const fn flag(self) -> TraitSet {
        match self {
            TraitKind::FirstStrike => TraitSet::FIRST_STRIKE,
            TraitKind::Endurance => TraitSet::ENDURANCE,
            TraitKind::Counter => TraitSet::COUNTER,
            TraitKind::CriticalMaster => TraitSet::CRITICAL_MASTER,
        }
    }
}

bitflags! {
    /// Active traits of one combatant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TraitSet: u8 {
        const FIRST_STRIKE    = 1 << 0;
        const ENDURANCE       = 1 << 1;
        const COUNTER         = 1 << 2;
        const CRITICAL_MASTER = 1 << 3;
    }
}

impl TraitSet {
    pub fn has(&self, kind: TraitKind) -> bool {
        self.contains(kind.flag())
    }

    /// Active trait kinds in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = TraitKind> + '_ {
        TraitKind::iter().filter(move |kind| self.has(*kind))
    }
}

/// Activation rule of a trait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Own stat strictly above a fixed threshold.
    Exceeds { stat: StatKind, threshold: u32 },
    /// Own stat strictly above the opponent's same stat.
    ExceedsOpponent { stat: StatKind },
}

impl Requirement {
    /// Without an opponent, opponent-relative requirements are unmet.
    pub fn is_met(&self, own: &StatBlock, opponent: Option<&StatBlock>) -> bool {
        match *self {
            Requirement::Exceeds { stat, threshold } => own.get(stat) > threshold,
            Requirement::ExceedsOpponent { stat } => {
                opponent.is_some_and(|other| own.get(stat) > other.get(stat))
            }
        }
    }
}

/// What an active trait does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraitEffect {
    /// Acts first regardless of the agility tiebreak.
    ActsFirst,
    /// Heals a fraction of max health at the start of each own turn.
    TurnStartHeal { fraction: f64 },
    /// May reflect part of each incoming hit.
    Reflect { chance: f64, fraction: f64 },
    /// May multiply damage of each damaging action.
    CriticalHit { chance: f64, multiplier: f64 },
}

/// Fixed catalog entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraitSpec {
    pub kind: TraitKind,
    pub requirement: Requirement,
    pub effect: TraitEffect,
}

impl TraitSpec {
    /// The four-trait catalog, parameterized by config.
    pub fn catalog(params: &TraitParams) -> [TraitSpec; 4] {
        [
            TraitSpec {
                kind: TraitKind::FirstStrike,
                requirement: Requirement::ExceedsOpponent {
                    stat: StatKind::Agility,
                },
                effect: TraitEffect::ActsFirst,
            },
            TraitSpec {
                kind: TraitKind::Endurance,
                requirement: Requirement::Exceeds {
                    stat: StatKind::Stamina,
                    threshold: params.endurance_stamina_threshold,
                },
                effect: TraitEffect::TurnStartHeal {
                    fraction: params.endurance_heal_fraction,
                },
            },
            TraitSpec {
                kind: TraitKind::Counter,
                requirement: Requirement::Exceeds {
                    stat: StatKind::Defense,
                    threshold: params.counter_defense_threshold,
                },
                effect: TraitEffect::Reflect {
                    chance: params.counter_chance,
                    fraction: params.counter_reflect_fraction,
                },
            },
            TraitSpec {
                kind: TraitKind::CriticalMaster,
                requirement: Requirement::Exceeds {
                    stat: StatKind::Strength,
                    threshold: params.critical_strength_threshold,
                },
                effect: TraitEffect::CriticalHit {
                    chance: params.critical_chance,
                    multiplier: params.critical_multiplier,
                },
            },
        ]
    }
}

/// Evaluates which traits are active for `own`, independently per trait.
pub fn evaluate_traits(
    own: &StatBlock,
    opponent: Option<&StatBlock>,
    params: &TraitParams,
) -> TraitSet {
    TraitSpec::catalog(params)
        .iter()
        .filter(|spec| spec.requirement.is_met(own, opponent))
        .fold(TraitSet::empty(), |set, spec| set | spec.kind.flag())
}
