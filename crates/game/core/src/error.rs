//! Common error infrastructure for game-core.
//!
//! This module provides the shared severity classification and the single
//! [`CombatError`] enum surfaced by stats construction, combatant operations,
//! action execution, and the action log.
//!
//! # Design Principles
//!
//! - **Precise**: numeric and resource failures carry the exact values involved
//! - **Never swallowed**: combatant and action code always return the error to
//!   the immediate caller; only the decision boundary in the runtime recovers
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::state::CombatantId;
use crate::stats::ResourceKind;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with an alternative action
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating broken configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough mana for a spell
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative health, unknown combatant id
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game errors.
///
/// Provides a uniform interface for error classification across crates. The
/// runtime implements it for its own error type as well.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// The specific invariant a [`Stats`](crate::Stats) construction violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatsViolation {
    #[error("max health must be positive (got {0})")]
    NonPositiveMaxHealth(i32),

    #[error("health {health} outside [0, {max_health}]")]
    HealthOutOfRange { health: i32, max_health: i32 },

    #[error("max mana must not be negative (got {0})")]
    NegativeMaxMana(i32),

    #[error("mana {mana} outside [0, {max_mana}]")]
    ManaOutOfRange { mana: i32, max_mana: i32 },

    #[error("attack power must not be negative (got {0})")]
    NegativeAttackPower(i32),

    #[error("defense must not be negative (got {0})")]
    NegativeDefense(i32),
}

/// Errors raised by the combat model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("invalid stats: {0}")]
    InvalidStats(StatsViolation),

    #[error("not enough {resource}: required {required}, available {available}")]
    InsufficientResource {
        resource: ResourceKind,
        required: i32,
        available: i32,
    },

    #[error("no action history to undo")]
    NoHistory,

    #[error("no combatant at {0}")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} cannot be borrowed twice")]
    SameCombatant(CombatantId),

    #[error("combatant builder is missing `{0}`")]
    MissingField(&'static str),
}

impl From<StatsViolation> for CombatError {
    fn from(violation: StatsViolation) -> Self {
        Self::InvalidStats(violation)
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. } | Self::NoHistory => ErrorSeverity::Recoverable,
            Self::InvalidStats(_) | Self::UnknownCombatant(_) | Self::MissingField(_) => {
                ErrorSeverity::Validation
            }
            Self::SameCombatant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStats(_) => "INVALID_STATS",
            Self::InsufficientResource { .. } => "INSUFFICIENT_RESOURCE",
            Self::NoHistory => "NO_HISTORY",
            Self::UnknownCombatant(_) => "UNKNOWN_COMBATANT",
            Self::SameCombatant(_) => "SAME_COMBATANT",
            Self::MissingField(_) => "MISSING_FIELD",
        }
    }
}

pub type Result<T> = core::result::Result<T, CombatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_resource_is_recoverable() {
        let err = CombatError::InsufficientResource {
            resource: ResourceKind::Mana,
            required: 10,
            available: 4,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "INSUFFICIENT_RESOURCE");
        assert_eq!(err.to_string(), "not enough mana: required 10, available 4");
    }

    #[test]
    fn stats_violation_converts_into_invalid_stats() {
        let err: CombatError = StatsViolation::NegativeDefense(-3).into();
        assert_eq!(err, CombatError::InvalidStats(StatsViolation::NegativeDefense(-3)));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
