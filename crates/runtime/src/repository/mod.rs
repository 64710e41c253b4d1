//! Key-value stores backing the persisted aggregates.
//!
//! Values are JSON documents; the typed services in [`crate::services`]
//! decide which keys hold which aggregate.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, load_json, save_json};
