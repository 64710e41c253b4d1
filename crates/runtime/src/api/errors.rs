//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations, content lookups and repository failures so clients
//! can bubble them up with consistent context.
use battle_core::{BattleError, BattleMode, ErrorSeverity};
use battle_content::ContentError;
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no pet has been created yet")]
    NoActivePet,

    #[error("no battle or run is in progress")]
    NoActiveBattle,

    #[error("a battle or run is still in progress")]
    BattleInProgress,

    #[error("{found} cannot be played as a {expected}")]
    ModeMismatch {
        expected: &'static str,
        found: BattleMode,
    },
}

impl RuntimeError {
    /// Severity of the underlying failure. Storage failures are fatal for the
    /// operation that hit them.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Battle(err) => err.severity(),
            Self::Content(_) | Self::NoActivePet | Self::Repository(_) => ErrorSeverity::Fatal,
            Self::NoActiveBattle | Self::BattleInProgress | Self::ModeMismatch { .. } => {
                ErrorSeverity::Validation
            }
        }
    }
}
