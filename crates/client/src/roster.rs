//! Team rosters read from the environment.
use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use game_content::CombatantFactory;
use game_core::{Archetype, Combatant};

pub const DEFAULT_TEAM_ONE: &str = "Conan:warrior,Gandalf:mage";
pub const DEFAULT_TEAM_TWO: &str = "Legolas:archer,Shadow:rogue";

/// One `name:archetype` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub archetype: Archetype,
}

/// Parse a comma separated list of `name:archetype` entries.
pub fn parse_roster(list: &str) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();

    for raw in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((name, archetype)) = raw.split_once(':') else {
            bail!("roster entry '{raw}' must look like name:archetype");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("roster entry '{raw}' has an empty name");
        }
        let archetype = archetype
            .trim()
            .parse::<Archetype>()
            .with_context(|| format!("unknown archetype in roster entry '{raw}'"))?;

        entries.push(RosterEntry {
            name: name.to_owned(),
            archetype,
        });
    }

    if entries.is_empty() {
        bail!("roster '{list}' names no combatants");
    }
    Ok(entries)
}

/// Build the preset factory, preferring a RON file at `path` over the
/// embedded table.
pub fn preset_factory(path: Option<&str>) -> Result<CombatantFactory> {
    match path {
        Some(path) => {
            tracing::info!(path, "loading archetype presets from file");
            CombatantFactory::from_file(Path::new(path))
        }
        None => CombatantFactory::new(),
    }
}

/// Preset factory honouring `SKIRMISH_PRESETS`.
pub fn factory_from_env() -> Result<CombatantFactory> {
    let path = env::var("SKIRMISH_PRESETS").ok();
    preset_factory(path.as_deref().filter(|p| !p.trim().is_empty()))
        .context("invalid SKIRMISH_PRESETS")
}

/// Read a roster from `key`, falling back to `default` when unset.
pub fn roster_from_env(
    factory: &CombatantFactory,
    key: &str,
    default: &str,
) -> Result<Vec<Combatant>> {
    let list = env::var(key).unwrap_or_else(|_| default.to_owned());
    let entries = parse_roster(&list).with_context(|| format!("invalid {key}"))?;

    entries
        .into_iter()
        .map(|entry| factory.create(entry.name, entry.archetype))
        .collect()
}
