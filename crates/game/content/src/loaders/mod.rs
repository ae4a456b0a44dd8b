//! Content loaders for reading archetype data.

pub mod archetypes;
pub mod factory;

pub use archetypes::{ArchetypeLoader, ArchetypePreset, PresetTable};
pub use factory::CombatantFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a preset file into memory.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open preset file {}", path.display()))
}
