//! Repository contract for the host's key-value storage.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Result;

/// Get/set storage for serialized aggregates.
///
/// There is no transaction across keys: callers writing several keys must
/// tolerate a partial update.
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }

    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Load and decode the JSON document under `key`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
