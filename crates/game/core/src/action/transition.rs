use crate::error::Result;
use crate::state::{Battlefield, CombatantId};

/// How a concrete action variant mutates the battlefield and reverses itself.
///
/// `execute` records whatever pre-state `undo` needs. It must either succeed
/// completely or leave the battlefield untouched.
pub trait ActionTransition {
    /// The combatant whose state the action changes.
    fn target(&self) -> CombatantId;

    /// Applies the effect. Records the prior state for [`undo`](Self::undo).
    fn execute(&mut self, field: &mut Battlefield) -> Result<()>;

    /// Restores the state captured by the last successful `execute`.
    ///
    /// Does nothing when the action never ran.
    fn undo(&self, field: &mut Battlefield) -> Result<()>;

    /// Human-readable summary for display.
    fn describe(&self, field: &Battlefield) -> String;
}

/// Pre-state and effect size captured when an action executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Applied {
    /// Target health before the action ran.
    pub prior_health: i32,
    /// Health actually removed or restored.
    pub amount: i32,
}

/// Name of `id` for display, or the id itself when it is out of range.
pub(super) fn display_name(field: &Battlefield, id: CombatantId) -> String {
    field
        .get(id)
        .map(|combatant| combatant.name().to_owned())
        .unwrap_or_else(|_| id.to_string())
}
