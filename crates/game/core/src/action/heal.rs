use crate::error::Result;
use crate::state::{Battlefield, CombatantId};

use super::transition::{ActionTransition, Applied, display_name};

/// Restores a fixed amount of health to one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAction {
    pub target: CombatantId,
    pub amount: i32,
    applied: Option<Applied>,
}

impl HealAction {
    pub fn new(target: CombatantId, amount: i32) -> Self {
        Self {
            target,
            amount,
            applied: None,
        }
    }

    pub fn applied(&self) -> Option<Applied> {
        self.applied
    }
}

impl ActionTransition for HealAction {
    fn target(&self) -> CombatantId {
        self.target
    }

    fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        let target = field.get_mut(self.target)?;
        let prior_health = target.health();
        let amount = target.heal(self.amount);
        self.applied = Some(Applied {
            prior_health,
            amount,
        });
        Ok(())
    }

    fn undo(&self, field: &mut Battlefield) -> Result<()> {
        if let Some(applied) = self.applied {
            field.get_mut(self.target)?.set_health(applied.prior_health);
        }
        Ok(())
    }

    fn describe(&self, field: &Battlefield) -> String {
        let target = display_name(field, self.target);
        match self.applied {
            Some(applied) => format!("{target} is healed for {}", applied.amount),
            None => format!("heal {target} for {}", self.amount),
        }
    }
}
