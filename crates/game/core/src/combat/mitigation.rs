//! Incoming damage reduction.

use crate::stats::{Stats, scale};

/// How a combatant reduces incoming damage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum MitigationStrategy {
    /// Subtracts half the defense, never below zero.
    Standard,
    /// Subtracts the full defense, capped at 75% of the incoming damage.
    HeavyArmor,
}

impl MitigationStrategy {
    /// Returns the damage that gets through after mitigation.
    ///
    /// # Formula
    ///
    /// ```text
    /// Standard:   max(0, incoming - defense / 2)
    /// HeavyArmor: incoming - min(defense, incoming * 3 / 4)
    /// ```
    ///
    /// Heavy armor always lets at least a quarter of the hit through. Negative
    /// incoming values are treated as zero.
    pub fn compute_reduction(&self, defender: &Stats, incoming: i32) -> i32 {
        let incoming = incoming.max(0);
        match self {
            Self::Standard => incoming.saturating_sub(defender.defense() / 2).max(0),
            Self::HeavyArmor => {
                let cap = scale(incoming, 3, 4);
                incoming - defender.defense().min(cap)
            }
        }
    }
}
