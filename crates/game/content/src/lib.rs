//! Static combatant content.
//!
//! This crate holds the archetype preset table and the factory that turns a
//! `(name, archetype)` pair into a ready [`game_core::Combatant`]. Presets
//! are embedded RON data, parsed once when the factory is built.

pub mod loaders;

pub use loaders::{ArchetypeLoader, ArchetypePreset, CombatantFactory, LoadResult, PresetTable};
