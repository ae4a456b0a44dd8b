//! Raw damage calculation.

use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::stats::{ResourceKind, Stats, below_percent, scale};

// ============================================================================
// Damage Strategy
// ============================================================================

/// How a combatant turns its stats into raw (pre-mitigation) attack output.
///
/// The variant set is closed: each variant is one fixed formula.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum DamageStrategy {
    /// `floor(attack_power * 1.2)`.
    Melee,
    /// `attack_power + floor(mana / 10)`, costs 10 mana.
    Magic,
    /// `floor(attack_power * 0.8)`, times 1.5 against targets below 30% health.
    Ranged,
}

/// Raw damage produced by a strategy together with the resource it consumes.
///
/// Strategies never mutate; the attacking combatant applies `mana_cost`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub damage: i32,
    pub mana_cost: i32,
}

impl DamageRoll {
    const fn free(damage: i32) -> Self {
        Self {
            damage,
            mana_cost: 0,
        }
    }
}

impl DamageStrategy {
    /// Calculate raw damage from `attacker` against `target`.
    ///
    /// # Formula
    ///
    /// ```text
    /// Melee:  attack * 6 / 5
    /// Magic:  attack + mana / 10          (bonus from mana before the cost)
    /// Ranged: base = attack * 4 / 5
    ///         target below 30% health  => base * 3 / 2
    /// ```
    ///
    /// All inputs are non-negative, so integer division is the floor. Products
    /// are taken in 64 bits and saturate at `i32::MAX`.
    ///
    /// # Errors
    ///
    /// [`CombatError::InsufficientResource`] when a magic attacker holds less
    /// than the mana cost.
    pub fn compute_raw_damage(
        &self,
        attacker: &Stats,
        target: &Stats,
    ) -> Result<DamageRoll, CombatError> {
        match self {
            Self::Melee => Ok(DamageRoll::free(scale(attacker.attack_power(), 6, 5))),
            Self::Magic => {
                let cost = CombatConfig::MAGIC_MANA_COST;
                if attacker.mana() < cost {
                    return Err(CombatError::InsufficientResource {
                        resource: ResourceKind::Mana,
                        required: cost,
                        available: attacker.mana(),
                    });
                }
                let bonus = attacker.mana() / CombatConfig::MAGIC_MANA_PER_BONUS;
                Ok(DamageRoll {
                    damage: attacker.attack_power().saturating_add(bonus),
                    mana_cost: cost,
                })
            }
            Self::Ranged => {
                let base = scale(attacker.attack_power(), 4, 5);
                let critical = below_percent(
                    target.health(),
                    target.max_health(),
                    CombatConfig::RANGED_CRITICAL_PERCENT,
                );
                Ok(DamageRoll::free(if critical { scale(base, 3, 2) } else { base }))
            }
        }
    }

    /// Whether this strategy consumes a resource on every attack.
    pub const fn requires_mana(&self) -> bool {
        matches!(self, Self::Magic)
    }
}
