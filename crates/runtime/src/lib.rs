//! Runtime orchestration for pet battles.
//!
//! This crate wires the pure rules in `battle-core` to persistence and
//! entropy. Consumers embed [`Runtime`] to create pets, open energy-gated
//! battles, step them turn by turn and settle the payout.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`session`] owns one in-progress match
//! - [`api`] exposes the error types downstream clients handle
//! - [`services`] map the persisted aggregates onto a key-value store
//! - [`repository`] provides the key-value stores themselves
pub mod api;
pub mod repository;
pub mod runtime;
pub mod services;
pub mod session;

pub use api::{Result, RuntimeError};
pub use repository::{FileStore, InMemoryStore, KeyValueStore, RepositoryError};
pub use runtime::{Runtime, RuntimeBuilder};
pub use services::{BattleStatsRepository, ProfileService};
pub use session::{BattleSession, Settlement};
