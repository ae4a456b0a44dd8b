//! Asynchronous abstraction for choosing a combatant's action.
//!
//! Hosts plug in [`DecisionAgent`] implementations so a match can run with
//! human input, fixed rules, or a remote reasoning service.
use async_trait::async_trait;
use game_core::{Action, Battlefield, Combatant, CombatantId, MatchState};

use super::errors::Result;

/// Read-only view handed to an agent for one decision.
///
/// The agent sees the whole battlefield by reference; allies and enemies are
/// derived from it rather than copied.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub actor: CombatantId,
    pub field: &'a Battlefield,
    pub state: MatchState,
}

impl<'a> DecisionContext<'a> {
    pub fn new(actor: CombatantId, field: &'a Battlefield, state: MatchState) -> Self {
        Self {
            actor,
            field,
            state,
        }
    }

    /// The acting combatant.
    pub fn me(&self) -> Result<&'a Combatant> {
        Ok(self.field.get(self.actor)?)
    }

    /// Living members of the actor's team, the actor included.
    pub fn allies(&self) -> Vec<(CombatantId, &'a Combatant)> {
        self.field.allies_of(self.actor)
    }

    /// Living members of the opposing team.
    pub fn enemies(&self) -> Vec<(CombatantId, &'a Combatant)> {
        self.field.enemies_of(self.actor)
    }
}

/// Chooses the action for a combatant's turn.
///
/// Implementations may block on I/O. The controller bounds every call with a
/// timeout and replaces any failure with its fallback, so an agent is free to
/// return errors instead of guessing.
#[async_trait]
pub trait DecisionAgent: Send + Sync {
    /// Decide the action for `ctx.actor`.
    async fn decide(&self, ctx: &DecisionContext<'_>) -> Result<Action>;

    /// Short label used in logs and error messages.
    fn name(&self) -> &str;
}
