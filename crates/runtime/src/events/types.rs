//! Event types published during a match.

use game_core::{Action, CombatantId, MatchState};
use serde::{Deserialize, Serialize};

use crate::controller::MatchOutcome;

/// Everything the controller reports while a match runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A living combatant is about to decide.
    TurnStarted {
        actor: CombatantId,
        name: String,
        state: MatchState,
    },

    /// An action executed and was appended to the log.
    ActionExecuted {
        action: Action,
        description: String,
        state: MatchState,
    },

    /// The bound agent failed and the fallback decision replaced it.
    FallbackApplied {
        actor: CombatantId,
        agent: String,
        reason: String,
    },

    /// Neither the agent's decision nor the fallback could execute.
    TurnForfeited { actor: CombatantId, reason: String },

    /// Both teams finished a full pass.
    RoundCompleted { round: u32 },

    /// The most recent logged action was reversed.
    ActionUndone {
        action: Action,
        description: String,
        state: MatchState,
    },

    /// The match ended.
    GameOver {
        outcome: MatchOutcome,
        state: MatchState,
    },
}
