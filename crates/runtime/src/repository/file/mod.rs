//! File-backed store: one JSON document per key.
mod store;

pub use store::FileStore;
