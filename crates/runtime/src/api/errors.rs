//! Unified error types surfaced by the runtime API.
//!
//! Wraps combat failures and decision-agent failures so hosts can bubble
//! them up with consistent context. Only [`RuntimeError::UnboundCombatant`],
//! [`RuntimeError::EmptyRoster`], and [`RuntimeError::InvalidConfig`] end a
//! match; everything an agent causes is recovered by the controller.
use std::time::Duration;

use game_core::{CombatError, CombatantKey, ErrorSeverity, GameError, TeamId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no decision agent bound to {key}")]
    UnboundCombatant { key: CombatantKey },

    #[error("{agent} returned an unusable decision: {reason}")]
    UnresolvableDecision { agent: String, reason: String },

    #[error("{agent} did not decide within {timeout:?}")]
    AgentTimeout { agent: String, timeout: Duration },

    #[error("decision agent channel closed")]
    AgentChannelClosed,

    #[error("{team} has no combatants")]
    EmptyRoster { team: TeamId },

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),
}

impl RuntimeError {
    pub(crate) fn unresolvable(agent: &str, reason: impl Into<String>) -> Self {
        Self::UnresolvableDecision {
            agent: agent.to_owned(),
            reason: reason.into(),
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnresolvableDecision { .. }
            | Self::AgentTimeout { .. }
            | Self::AgentChannelClosed => ErrorSeverity::Recoverable,
            Self::Combat(error) => error.severity(),
            Self::EmptyRoster { .. } | Self::InvalidConfig(_) => ErrorSeverity::Validation,
            Self::UnboundCombatant { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnboundCombatant { .. } => "UNBOUND_COMBATANT",
            Self::UnresolvableDecision { .. } => "UNRESOLVABLE_DECISION",
            Self::AgentTimeout { .. } => "AGENT_TIMEOUT",
            Self::AgentChannelClosed => "AGENT_CHANNEL_CLOSED",
            Self::EmptyRoster { .. } => "EMPTY_ROSTER",
            Self::Combat(error) => error.error_code(),
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
