//! Error infrastructure for battle-core.
//!
//! Errors are classified by how a caller should react:
//! - **Fatal**: a precondition was violated (missing or invalid pet data); the
//!   caller must not proceed with the battle.
//! - **Recoverable**: a resource was short (energy, gems); report the declined
//!   action to the player and carry on.
//! - **Validation**: the request itself was out of order (acting after the
//!   battle ended, acting out of turn).
//!
//! The daily runner gem cap is deliberately not an error; it shows up as a
//! zero reward with [`crate::RewardResult::daily_limit_reached`] set.

use crate::battle::Side;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later or with different input (e.g. after energy regenerates).
    Recoverable,
    /// Invalid request; retrying unchanged will fail again.
    Validation,
    /// Broken precondition; the operation cannot run at all.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors surfaced by battle rules, generators and progression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("combatant '{name}' has an invalid stat block: {reason}")]
    InvalidStatBlock { name: String, reason: &'static str },

    #[error("battle has not started")]
    NotStarted,

    #[error("battle has already started")]
    AlreadyStarted,

    #[error("battle has already ended")]
    BattleEnded,

    #[error("it is not the {side} side's turn")]
    NotYourTurn { side: Side },

    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("not enough gems: need {required}, have {available}")]
    InsufficientGems { required: u64, available: u64 },

    #[error("pet is already at the maximum tier ({max})")]
    MaxTierReached { max: u8 },

    #[error("evolving to tier {tier} requires level {required} (current level {current})")]
    LevelTooLow { tier: u8, required: u32, current: u32 },
}

impl BattleError {
    /// Classifies the error per the taxonomy in the module docs.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidStatBlock { .. } => ErrorSeverity::Fatal,
            Self::InsufficientEnergy { .. }
            | Self::InsufficientGems { .. }
            | Self::LevelTooLow { .. } => ErrorSeverity::Recoverable,
            Self::NotStarted
            | Self::AlreadyStarted
            | Self::BattleEnded
            | Self::NotYourTurn { .. }
            | Self::MaxTierReached { .. } => ErrorSeverity::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_taxonomy() {
        let missing = BattleError::InvalidStatBlock {
            name: "Vigor".into(),
            reason: "health must be positive",
        };
        assert_eq!(missing.severity(), ErrorSeverity::Fatal);

        let broke = BattleError::InsufficientEnergy {
            required: 20,
            available: 5,
        };
        assert!(broke.severity().is_recoverable());
        assert_eq!(
            broke.to_string(),
            "not enough energy: need 20, have 5"
        );

        assert_eq!(BattleError::BattleEnded.severity(), ErrorSeverity::Validation);
    }
}
