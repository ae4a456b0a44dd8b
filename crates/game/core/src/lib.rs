//! Deterministic combat rules shared by the runtime and its hosts.
//!
//! `game-core` defines the combatant model, the damage and mitigation
//! formulas, undoable actions, and the match progress snapshot. It performs
//! no I/O and has no async code; the runtime drives turns on top of it.
pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{Action, ActionLog, ActionTransition, Applied, AttackAction, HealAction};
pub use combat::{
    AttackSequence, DamageRoll, DamageStrategy, MitigationStrategy, PowerAttack, StandardAttack,
    run_sequence,
};
pub use config::CombatConfig;
pub use error::{CombatError, ErrorSeverity, GameError, Result, StatsViolation};
pub use state::{
    Archetype, Battlefield, Combatant, CombatantBuilder, CombatantId, CombatantKey, MatchState,
    TeamId, lowest_health,
};
pub use stats::{ResourceKind, Stats, below_percent, scale};
