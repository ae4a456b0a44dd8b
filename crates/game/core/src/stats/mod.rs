//! Stat model for combatants.
//!
//! [`Stats`] is an immutable value: every health or mana change produces a new
//! snapshot, so a combatant always holds exactly one current set of numbers.
//!
//! ## Invariants
//!
//! Enforced at construction and preserved by every mutator:
//!
//! - `0 <= health <= max_health`, `max_health > 0`
//! - `0 <= mana <= max_mana`
//! - `attack_power >= 0`, `defense >= 0`
//!
//! Construction rejects violations with
//! [`CombatError::InvalidStats`](crate::CombatError::InvalidStats); the
//! `with_*` mutators clamp instead of failing.

pub mod core;
pub mod resources;

pub use self::core::Stats;
pub use resources::{ResourceKind, below_percent, scale};
