//! Starter template loader.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::templates::{PetTemplate, StarterCatalog};

/// Loader for starter templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load a list of templates; ids must be unique ignoring case and every
    /// template must have positive health.
    pub fn load(path: &Path) -> LoadResult<StarterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StarterCatalog> {
        let templates: Vec<PetTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse pets RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.to_ascii_lowercase()) {
                anyhow::bail!("duplicate pet template id: {}", template.id);
            }
            template
                .base_stats
                .validate(&template.name)
                .map_err(|e| anyhow::anyhow!("Invalid pet template {}: {}", template.id, e))?;
        }

        Ok(StarterCatalog::new(templates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Species;

    const EMBER: &str = r#"(
        id: "ember",
        name: "Ember",
        species: Bird,
        description: "Test bird",
        base_stats: (
            health: 60, energy: 80, strength: 40, defense: 40,
            stamina: 50, agility: 90, attack: 55,
        ),
    )"#;

    #[test]
    fn parses_templates() {
        let catalog = TemplateLoader::parse(&format!("[{EMBER}]")).expect("valid templates");
        let ember = catalog.get("EMBER").expect("loaded");
        assert_eq!(ember.species, Species::Bird);
        assert_eq!(ember.base_stats.agility, 90);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let doubled = format!("[{EMBER}, {}]", EMBER.replace("\"ember\"", "\"Ember\""));
        let err = TemplateLoader::parse(&doubled).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_zero_health() {
        let broken = format!("[{EMBER}]").replace("health: 60", "health: 0");
        assert!(TemplateLoader::parse(&broken).is_err());
    }
}
