//! Combatant factory backed by the preset table.

use std::path::Path;

use anyhow::Context;
use game_core::{Archetype, Combatant};

use super::{ArchetypeLoader, LoadResult, PresetTable};

/// Builds combatants at full health from archetype presets.
#[derive(Clone, Debug)]
pub struct CombatantFactory {
    presets: PresetTable,
}

impl CombatantFactory {
    /// Creates a factory from the embedded preset table.
    pub fn new() -> LoadResult<Self> {
        Ok(Self::with_presets(ArchetypeLoader::load_embedded()?))
    }

    /// Creates a factory from a RON preset file.
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        Ok(Self::with_presets(ArchetypeLoader::load(path)?))
    }

    pub fn with_presets(presets: PresetTable) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn create(&self, name: impl Into<String>, archetype: Archetype) -> LoadResult<Combatant> {
        let preset = self
            .presets
            .get(archetype)
            .with_context(|| format!("No preset for {}", archetype))?;

        Ok(Combatant::new(
            name,
            archetype,
            preset.stats()?,
            preset.damage,
            preset.mitigation,
        ))
    }

    pub fn warrior(&self, name: impl Into<String>) -> LoadResult<Combatant> {
        self.create(name, Archetype::Warrior)
    }

    pub fn mage(&self, name: impl Into<String>) -> LoadResult<Combatant> {
        self.create(name, Archetype::Mage)
    }

    pub fn archer(&self, name: impl Into<String>) -> LoadResult<Combatant> {
        self.create(name, Archetype::Archer)
    }

    pub fn rogue(&self, name: impl Into<String>) -> LoadResult<Combatant> {
        self.create(name, Archetype::Rogue)
    }
}
