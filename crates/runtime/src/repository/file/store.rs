use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{KeyValueStore, RepositoryError, Result};

/// File-based implementation of [`KeyValueStore`].
///
/// Each key is stored as `{key}.json` under the base directory. Writes go to
/// a temp file first and are renamed into place.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        tracing::debug!("Loaded {} from {}", key, path.display());
        Ok(Some(raw))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Removed {}", key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(key) = filename.strip_suffix(".json")
            {
                keys.push(key.to_string());
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path()).unwrap().set("gems", "42").unwrap();

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.get("gems").unwrap().as_deref(), Some("42"));
        assert_eq!(reopened.keys().unwrap(), vec!["gems".to_string()]);
        assert!(!dir.path().join("gems.json.tmp").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "1"),
            Err(RepositoryError::InvalidKey(_))
        ));
        assert!(!store.contains("../escape"));
    }

    #[test]
    fn missing_and_removed_keys_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("pet").unwrap(), None);

        store.set("pet", "{}").unwrap();
        store.remove("pet").unwrap();
        store.remove("pet").unwrap();
        assert_eq!(store.get("pet").unwrap(), None);
    }
}
