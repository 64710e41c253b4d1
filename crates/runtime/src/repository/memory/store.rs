use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{KeyValueStore, RepositoryError, Result};

/// In-memory implementation of [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{load_json, save_json};
    use battle_core::BattleRecord;

    #[test]
    fn stores_json_documents() {
        let store = InMemoryStore::new();
        assert_eq!(load_json::<BattleRecord>(&store, "battle_stats").unwrap(), None);

        let mut record = BattleRecord::default();
        record.pvp.wins = 3;
        save_json(&store, "battle_stats", &record).unwrap();

        assert!(store.contains("battle_stats"));
        assert_eq!(load_json(&store, "battle_stats").unwrap(), Some(record));
        assert_eq!(store.keys().unwrap(), vec!["battle_stats".to_string()]);

        store.remove("battle_stats").unwrap();
        assert!(!store.contains("battle_stats"));
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        let store = InMemoryStore::new();
        store.set("gems", "not json").unwrap();
        assert!(matches!(
            load_json::<u64>(&store, "gems"),
            Err(RepositoryError::Json(_))
        ));
    }
}
