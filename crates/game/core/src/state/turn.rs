use std::fmt;

/// Immutable snapshot of match progress.
///
/// Every transition returns a new value; the controller replaces its copy
/// after each action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub turn: u32,
    pub round: u32,
    pub can_undo: bool,
    pub history_size: usize,
}

impl MatchState {
    /// Turn 1 of round 1 with an empty history.
    pub const fn initial() -> Self {
        Self {
            turn: 1,
            round: 1,
            can_undo: false,
            history_size: 0,
        }
    }

    /// Increments the turn counter only.
    #[must_use]
    pub const fn next_turn(self) -> Self {
        Self {
            turn: self.turn + 1,
            ..self
        }
    }

    /// Starts the next round at turn 1.
    #[must_use]
    pub const fn next_round(self) -> Self {
        Self {
            turn: 1,
            round: self.round + 1,
            ..self
        }
    }

    #[must_use]
    pub const fn with_undo(self, can_undo: bool, history_size: usize) -> Self {
        Self {
            can_undo,
            history_size,
            ..self
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}, turn {}", self.round, self.turn)
    }
}
