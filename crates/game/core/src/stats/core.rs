//! The immutable stat snapshot held by every combatant.

use std::fmt;

use crate::error::{CombatError, StatsViolation};

/// Health/mana bounds and the derived combat numbers of one combatant.
///
/// Fields are private so the invariants listed in the [module docs](super)
/// cannot be bypassed; read them through the accessor methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStats"))]
pub struct Stats {
    health: i32,
    max_health: i32,
    mana: i32,
    max_mana: i32,
    attack_power: i32,
    defense: i32,
}

impl Stats {
    /// Creates a stat snapshot, validating every invariant.
    pub fn new(
        health: i32,
        max_health: i32,
        mana: i32,
        max_mana: i32,
        attack_power: i32,
        defense: i32,
    ) -> Result<Self, CombatError> {
        if max_health <= 0 {
            return Err(StatsViolation::NonPositiveMaxHealth(max_health).into());
        }
        if !(0..=max_health).contains(&health) {
            return Err(StatsViolation::HealthOutOfRange { health, max_health }.into());
        }
        if max_mana < 0 {
            return Err(StatsViolation::NegativeMaxMana(max_mana).into());
        }
        if !(0..=max_mana).contains(&mana) {
            return Err(StatsViolation::ManaOutOfRange { mana, max_mana }.into());
        }
        if attack_power < 0 {
            return Err(StatsViolation::NegativeAttackPower(attack_power).into());
        }
        if defense < 0 {
            return Err(StatsViolation::NegativeDefense(defense).into());
        }

        Ok(Self {
            health,
            max_health,
            mana,
            max_mana,
            attack_power,
            defense,
        })
    }

    /// Creates stats at full health and full mana.
    pub fn full(
        max_health: i32,
        attack_power: i32,
        defense: i32,
        max_mana: i32,
    ) -> Result<Self, CombatError> {
        Self::new(
            max_health,
            max_health,
            max_mana,
            max_mana,
            attack_power,
            defense,
        )
    }

    pub const fn health(&self) -> i32 {
        self.health
    }

    pub const fn max_health(&self) -> i32 {
        self.max_health
    }

    pub const fn mana(&self) -> i32 {
        self.mana
    }

    pub const fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub const fn attack_power(&self) -> i32 {
        self.attack_power
    }

    pub const fn defense(&self) -> i32 {
        self.defense
    }

    /// Returns a copy with health clamped to `[0, max_health]`.
    #[must_use]
    pub fn with_health(&self, health: i32) -> Self {
        Self {
            health: health.clamp(0, self.max_health),
            ..*self
        }
    }

    /// Returns a copy with mana clamped to `[0, max_mana]`.
    #[must_use]
    pub fn with_mana(&self, mana: i32) -> Self {
        Self {
            mana: mana.clamp(0, self.max_mana),
            ..*self
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Health as a whole percentage of max health, rounded down.
    pub fn health_percent(&self) -> i32 {
        (i64::from(self.health) * 100 / i64::from(self.max_health)) as i32
    }
}

/// Unchecked wire form of [`Stats`]; deserialization funnels through
/// [`Stats::new`] so the invariants hold for decoded values too.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawStats {
    health: i32,
    max_health: i32,
    mana: i32,
    max_mana: i32,
    attack_power: i32,
    defense: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStats> for Stats {
    type Error = CombatError;

    fn try_from(raw: RawStats) -> Result<Self, Self::Error> {
        Self::new(
            raw.health,
            raw.max_health,
            raw.mana,
            raw.max_mana,
            raw.attack_power,
            raw.defense,
        )
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {}/{}, MP {}/{}, ATK {}, DEF {}",
            self.health, self.max_health, self.mana, self.max_mana, self.attack_power, self.defense
        )
    }
}
