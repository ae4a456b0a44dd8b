//! Combat formulas.
//!
//! Everything here is deterministic integer arithmetic over [`Stats`]
//! snapshots. Strategies are closed enums dispatched with `match`; attack
//! sequences are the only open extension point.
//!
//! - [`DamageStrategy`]: raw attack output and its mana cost
//! - [`MitigationStrategy`]: incoming damage reduction
//! - [`AttackSequence`] / [`run_sequence`]: phased attacks with hooks
//!
//! [`Stats`]: crate::Stats

pub mod damage;
pub mod mitigation;
pub mod sequence;

pub use damage::{DamageRoll, DamageStrategy};
pub use mitigation::MitigationStrategy;
pub use sequence::{AttackSequence, PowerAttack, StandardAttack, run_sequence};
