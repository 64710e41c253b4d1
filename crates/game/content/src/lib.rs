//! Static pet content and data-file loaders.
//!
//! - Starter pet templates (built in, or data-driven via RON)
//! - Battle balance (`BattleConfig`, data-driven via TOML)
//!
//! Content seeds new pets and tunes the rules; it never appears in battle state.

pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use templates::{
    ContentError, DEFAULT_TEMPLATE, PetTemplate, Species, StarterCatalog, create_pet_from_template,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, TemplateLoader};
