//! Agent registry mapping combatants to decision agents.
//!
//! # Design
//!
//! - **Agent instances**: Shared through `Arc`, so one agent can drive many
//!   combatants
//! - **Key**: [`CombatantKey`] (name + archetype), not roster position
//! - **No default**: an unbound combatant is a configuration error
//!
//! Because keys ignore stats, two roster entries with the same name and
//! archetype share one binding. Binding the same key twice replaces the
//! earlier agent and logs a warning.

use std::collections::HashMap;
use std::sync::Arc;

use game_core::{Combatant, CombatantKey};

use super::{DecisionAgent, Result, RuntimeError};

/// Registry of decision agents keyed by combatant identity.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    bindings: HashMap<CombatantKey, Arc<dyn DecisionAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `agent`, replacing any earlier binding.
    ///
    /// Returns the replaced agent, if any.
    pub fn bind(
        &mut self,
        key: CombatantKey,
        agent: Arc<dyn DecisionAgent>,
    ) -> Option<Arc<dyn DecisionAgent>> {
        let previous = self.bindings.insert(key.clone(), agent);
        if let Some(previous) = &previous {
            tracing::warn!(
                combatant = %key,
                replaced = previous.name(),
                "combatant key bound twice; earlier agent replaced"
            );
        }
        previous
    }

    /// Bind the combatant's key to `agent`.
    pub fn bind_combatant(
        &mut self,
        combatant: &Combatant,
        agent: Arc<dyn DecisionAgent>,
    ) -> Option<Arc<dyn DecisionAgent>> {
        self.bind(combatant.key(), agent)
    }

    /// Remove a binding. Returns the agent it held.
    pub fn unbind(&mut self, key: &CombatantKey) -> Option<Arc<dyn DecisionAgent>> {
        self.bindings.remove(key)
    }

    /// Get the agent bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::UnboundCombatant` when nothing is bound.
    pub fn get(&self, key: &CombatantKey) -> Result<Arc<dyn DecisionAgent>> {
        self.bindings
            .get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::UnboundCombatant { key: key.clone() })
    }

    pub fn contains(&self, key: &CombatantKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.bindings
                    .iter()
                    .map(|(key, agent)| (key.to_string(), agent.name().to_owned())),
            )
            .finish()
    }
}
