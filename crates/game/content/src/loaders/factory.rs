//! Content factory for loading everything a game session needs.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{ConfigLoader, LoadResult, TemplateLoader};
use crate::templates::StarterCatalog;

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── pets.ron
/// ```
///
/// Either file may be absent; the built-in defaults are used in its place.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle balance from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load starter templates from `pets.ron`.
    pub fn load_templates(&self) -> LoadResult<StarterCatalog> {
        let path = self.data_dir.join("pets.ron");
        if !path.exists() {
            return Ok(StarterCatalog::builtin());
        }
        TemplateLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_builtins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().expect("config"), BattleConfig::default());
        assert_eq!(factory.load_templates().expect("templates"), StarterCatalog::builtin());
    }

    #[test]
    fn shipped_data_matches_builtins() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));

        assert_eq!(factory.load_config().expect("config"), BattleConfig::default());
        assert_eq!(factory.load_templates().expect("templates"), StarterCatalog::builtin());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.toml"), "[energy\nmax = ").expect("write");

        let err = ContentFactory::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
