//! Archetype preset loader.
//!
//! Loads per-archetype starting stats and strategies from RON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use game_core::{Archetype, DamageStrategy, MitigationStrategy, Stats};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/archetypes.ron");

/// Starting numbers and strategy pair for one archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypePreset {
    pub archetype: Archetype,
    pub max_health: i32,
    pub attack_power: i32,
    pub defense: i32,
    pub max_mana: i32,
    pub damage: DamageStrategy,
    pub mitigation: MitigationStrategy,
}

impl ArchetypePreset {
    /// Full-health, full-mana stats for this preset.
    pub fn stats(&self) -> game_core::Result<Stats> {
        Stats::full(
            self.max_health,
            self.attack_power,
            self.defense,
            self.max_mana,
        )
    }
}

/// One validated preset per archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetTable {
    presets: BTreeMap<Archetype, ArchetypePreset>,
}

impl PresetTable {
    pub fn get(&self, archetype: Archetype) -> Option<&ArchetypePreset> {
        self.presets.get(&archetype)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypePreset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Loader for archetype presets.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Parses the preset table compiled into the crate.
    pub fn load_embedded() -> LoadResult<PresetTable> {
        Self::parse(EMBEDDED).context("Failed to parse embedded archetypes.ron")
    }

    /// Loads a preset table from a RON file.
    pub fn load(path: &Path) -> LoadResult<PresetTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parses and validates a preset table.
    ///
    /// Every archetype must appear exactly once and every entry must produce
    /// valid stats.
    pub fn parse(content: &str) -> LoadResult<PresetTable> {
        let entries: Vec<ArchetypePreset> = ron::from_str(content)?;

        let mut presets = BTreeMap::new();
        for preset in entries {
            preset
                .stats()
                .with_context(|| format!("Invalid stats for {}", preset.archetype))?;
            if presets.insert(preset.archetype, preset).is_some() {
                bail!("Duplicate preset for {}", preset.archetype);
            }
        }

        for archetype in Archetype::iter() {
            if !presets.contains_key(&archetype) {
                bail!("Missing preset for {}", archetype);
            }
        }

        Ok(PresetTable { presets })
    }
}
