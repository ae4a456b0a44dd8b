//! Attack sequences: a fixed phase order with per-variant hooks.
//!
//! [`run_sequence`] always drives the phases in the same order:
//!
//! ```text
//! begin_turn -> pre_attack -> perform_attack -> post_attack -> end_turn
//! ```
//!
//! Variants implement [`AttackSequence`] and override only the hooks they
//! need. The driver is a free function, so no variant can reorder or skip
//! phases. A failing phase stops the sequence and later hooks do not run.

use crate::config::CombatConfig;
use crate::error::Result;
use crate::state::Combatant;
use crate::stats::scale;

/// Hook points of one attack. Only `perform_attack` is required.
pub trait AttackSequence {
    fn begin_turn(&mut self, _attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        Ok(())
    }

    fn pre_attack(&mut self, _attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        Ok(())
    }

    /// Resolves the hit and returns the damage the defender actually lost.
    fn perform_attack(&mut self, attacker: &mut Combatant, defender: &mut Combatant)
    -> Result<i32>;

    fn post_attack(&mut self, _attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        Ok(())
    }

    fn end_turn(&mut self, _attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        Ok(())
    }
}

/// Runs every phase of `sequence` in order and returns the damage dealt.
pub fn run_sequence<S>(
    sequence: &mut S,
    attacker: &mut Combatant,
    defender: &mut Combatant,
) -> Result<i32>
where
    S: AttackSequence + ?Sized,
{
    sequence.begin_turn(attacker, defender)?;
    sequence.pre_attack(attacker, defender)?;
    let dealt = sequence.perform_attack(attacker, defender)?;
    sequence.post_attack(attacker, defender)?;
    sequence.end_turn(attacker, defender)?;
    Ok(dealt)
}

/// Plain attack with no extra effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardAttack;

impl AttackSequence for StandardAttack {
    fn perform_attack(
        &mut self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
    ) -> Result<i32> {
        let raw = attacker.attack(defender.stats())?;
        Ok(defender.take_damage(raw))
    }
}

/// Attack boosted by a quarter of the attacker's power, paid for with
/// recoil of a tenth of the attacker's max health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerAttack {
    bonus: i32,
    recoil: i32,
}

impl PowerAttack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bonus computed by the last `pre_attack`.
    pub fn bonus(&self) -> i32 {
        self.bonus
    }

    /// Recoil applied by the last `post_attack`.
    pub fn recoil(&self) -> i32 {
        self.recoil
    }
}

impl AttackSequence for PowerAttack {
    fn pre_attack(&mut self, attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        self.bonus = attacker.stats().attack_power() / CombatConfig::POWER_ATTACK_DIVISOR;
        Ok(())
    }

    fn perform_attack(
        &mut self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
    ) -> Result<i32> {
        let raw = attacker.attack(defender.stats())?;
        Ok(defender.take_damage(raw.saturating_add(self.bonus)))
    }

    fn post_attack(&mut self, attacker: &mut Combatant, _defender: &mut Combatant) -> Result<()> {
        let stats = attacker.stats();
        self.recoil = scale(
            stats.max_health(),
            i64::from(CombatConfig::POWER_ATTACK_RECOIL_PERCENT),
            100,
        );
        attacker.set_health(stats.health() - self.recoil);
        Ok(())
    }
}
