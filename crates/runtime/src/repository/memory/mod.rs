//! In-memory store for tests and local runs.
mod store;

pub use store::InMemoryStore;
