use crate::error::{CombatError, Result};
use crate::state::Battlefield;

use super::Action;

/// Ordered history of successfully executed actions.
///
/// `len()` is the authoritative count of executed commands.
#[derive(Clone, Debug, Default)]
pub struct ActionLog {
    history: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `action` and appends it only if execution succeeded.
    pub fn execute(&mut self, mut action: Action, field: &mut Battlefield) -> Result<&Action> {
        action.execute(field)?;
        self.history.push(action);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Reverses and removes the most recent action.
    ///
    /// The entry stays in the log if its undo fails.
    pub fn undo_last(&mut self, field: &mut Battlefield) -> Result<Action> {
        let last = self.history.last().ok_or(CombatError::NoHistory)?;
        last.undo(field)?;
        self.history.pop().ok_or(CombatError::NoHistory)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last(&self) -> Option<&Action> {
        self.history.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.history.iter()
    }
}
