use crate::error::Result;
use crate::state::{Battlefield, CombatantId};

use super::transition::{ActionTransition, Applied, display_name};

/// One combatant strikes another with its current damage strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker: CombatantId,
    pub target: CombatantId,
    applied: Option<Applied>,
}

impl AttackAction {
    pub fn new(attacker: CombatantId, target: CombatantId) -> Self {
        Self {
            attacker,
            target,
            applied: None,
        }
    }

    pub fn applied(&self) -> Option<Applied> {
        self.applied
    }
}

impl ActionTransition for AttackAction {
    fn target(&self) -> CombatantId {
        self.target
    }

    fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        let (attacker, target) = field.pair_mut(self.attacker, self.target)?;
        let prior_health = target.health();
        let raw = attacker.attack(target.stats())?;
        let amount = target.take_damage(raw);
        self.applied = Some(Applied {
            prior_health,
            amount,
        });
        Ok(())
    }

    /// Restores the target's health exactly. Mana the attacker spent stays
    /// spent.
    fn undo(&self, field: &mut Battlefield) -> Result<()> {
        if let Some(applied) = self.applied {
            field.get_mut(self.target)?.set_health(applied.prior_health);
        }
        Ok(())
    }

    fn describe(&self, field: &Battlefield) -> String {
        let attacker = display_name(field, self.attacker);
        let target = display_name(field, self.target);
        match self.applied {
            Some(applied) => format!("{attacker} attacks {target} for {} damage", applied.amount),
            None => format!("{attacker} attacks {target}"),
        }
    }
}
