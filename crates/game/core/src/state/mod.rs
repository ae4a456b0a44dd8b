//! Mutable match entities and the progress snapshot.
//!
//! - [`Combatant`]: one participant, its stats and strategy pair
//! - [`Battlefield`]: both rosters, addressed by [`CombatantId`]
//! - [`MatchState`]: turn/round counters and undo availability

mod battlefield;
mod combatant;
mod turn;

pub use battlefield::{Battlefield, CombatantId, TeamId, lowest_health};
pub use combatant::{Archetype, Combatant, CombatantBuilder, CombatantKey};
pub use turn::MatchState;
