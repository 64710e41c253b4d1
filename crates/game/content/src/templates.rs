//! Starter pet templates.

use battle_core::{PetProfile, StatBlock};

/// Id of the template handed out when the player has not picked one.
pub const DEFAULT_TEMPLATE: &str = "vigor";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("pet template not found: {0}")]
    UnknownTemplate(String),
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Species {
    Dog,
    Cat,
    Bear,
    Bird,
}

/// Blueprint for a starter pet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PetTemplate {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub description: String,
    pub base_stats: StatBlock,
}

impl PetTemplate {
    fn builtin(
        id: &str,
        name: &str,
        species: Species,
        description: &str,
        base_stats: StatBlock,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            species,
            description: description.to_string(),
            base_stats,
        }
    }

    /// Level-1, tier-1 pet with no XP and the template's base stats.
    pub fn instantiate(&self) -> PetProfile {
        PetProfile::new(self.id.clone(), self.name.clone(), self.base_stats)
    }
}

/// Lookup table of starter templates. Ids match case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StarterCatalog {
    templates: Vec<PetTemplate>,
}

impl StarterCatalog {
    pub fn new(templates: Vec<PetTemplate>) -> Self {
        Self { templates }
    }

    /// The four starters shipped with the game.
    pub fn builtin() -> Self {
        Self::new(vec![
            PetTemplate::builtin(
                "vigor",
                "Vigor",
                Species::Dog,
                "A loyal companion with incredible endurance",
                StatBlock::new(80, 70, 65, 60, 90, 55, 70),
            ),
            PetTemplate::builtin(
                "zen",
                "Zen",
                Species::Cat,
                "A graceful feline with lightning-fast reflexes",
                StatBlock::new(70, 75, 55, 50, 60, 95, 65),
            ),
            PetTemplate::builtin(
                "atlas",
                "Atlas",
                Species::Bear,
                "A powerful guardian with unmatched strength",
                StatBlock::new(100, 65, 95, 90, 70, 45, 85),
            ),
            PetTemplate::builtin(
                "swift",
                "Swift",
                Species::Bird,
                "A soaring spirit with boundless energy",
                StatBlock::new(65, 95, 50, 45, 75, 85, 60),
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&PetTemplate> {
        self.templates
            .iter()
            .find(|template| template.id.eq_ignore_ascii_case(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PetTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn create_pet(&self, id: &str) -> Result<PetProfile, ContentError> {
        self.get(id)
            .map(PetTemplate::instantiate)
            .ok_or_else(|| ContentError::UnknownTemplate(id.to_string()))
    }
}

impl Default for StarterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Creates a fresh pet from one of the built-in starters.
pub fn create_pet_from_template(id: &str) -> Result<PetProfile, ContentError> {
    StarterCatalog::builtin().create_pet(id)
}
