//! Undoable combat actions.
//!
//! An [`Action`] is a closed set of variants, each implementing
//! [`ActionTransition`]. Actions address combatants by [`CombatantId`] and
//! capture just enough pre-state during execution to reverse themselves.
//! [`ActionLog`] keeps the successfully executed ones in order.

mod attack;
mod heal;
mod log;
mod transition;

pub use attack::AttackAction;
pub use heal::HealAction;
pub use log::ActionLog;
pub use transition::{ActionTransition, Applied};

use crate::error::Result;
use crate::state::{Battlefield, CombatantId};

/// Every action a combatant can take on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    Heal(HealAction),
}

impl Action {
    pub fn attack(attacker: CombatantId, target: CombatantId) -> Self {
        Self::Attack(AttackAction::new(attacker, target))
    }

    pub fn heal(target: CombatantId, amount: i32) -> Self {
        Self::Heal(HealAction::new(target, amount))
    }

    /// Combatant initiating the action, when the variant records one.
    pub fn actor(&self) -> Option<CombatantId> {
        match self {
            Self::Attack(action) => Some(action.attacker),
            Self::Heal(_) => None,
        }
    }

    /// Effect size of the last successful execution.
    pub fn applied(&self) -> Option<Applied> {
        match self {
            Self::Attack(action) => action.applied(),
            Self::Heal(action) => action.applied(),
        }
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Self::Attack(action) => action,
            Self::Heal(action) => action,
        }
    }

    fn transition_mut(&mut self) -> &mut dyn ActionTransition {
        match self {
            Self::Attack(action) => action,
            Self::Heal(action) => action,
        }
    }

    pub fn target(&self) -> CombatantId {
        self.transition().target()
    }

    pub fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        self.transition_mut().execute(field)
    }

    pub fn undo(&self, field: &mut Battlefield) -> Result<()> {
        self.transition().undo(field)
    }

    pub fn describe(&self, field: &Battlefield) -> String {
        self.transition().describe(field)
    }
}

impl From<AttackAction> for Action {
    fn from(action: AttackAction) -> Self {
        Self::Attack(action)
    }
}

impl From<HealAction> for Action {
    fn from(action: HealAction) -> Self {
        Self::Heal(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageStrategy, MitigationStrategy};
    use crate::error::CombatError;
    use crate::state::{Archetype, Combatant, TeamId};
    use crate::stats::Stats;

    const CONAN: CombatantId = CombatantId::new(TeamId::One, 0);
    const GANDALF: CombatantId = CombatantId::new(TeamId::Two, 0);

    fn field(mage_mana: i32) -> Battlefield {
        Battlefield::new(
            vec![Combatant::new(
                "Conan",
                Archetype::Warrior,
                Stats::full(150, 40, 30, 0).unwrap(),
                DamageStrategy::Melee,
                MitigationStrategy::HeavyArmor,
            )],
            vec![Combatant::new(
                "Gandalf",
                Archetype::Mage,
                Stats::new(80, 80, mage_mana, 100, 60, 10).unwrap(),
                DamageStrategy::Magic,
                MitigationStrategy::Standard,
            )],
        )
    }

    #[test]
    fn attack_records_damage_and_undo_restores_exactly() {
        let mut field = field(100);
        let mut action = Action::attack(CONAN, GANDALF);
        assert_eq!(action.describe(&field), "Conan attacks Gandalf");

        action.execute(&mut field).unwrap();
        assert_eq!(field.get(GANDALF).unwrap().health(), 37);
        assert_eq!(action.applied(), Some(Applied { prior_health: 80, amount: 43 }));
        assert_eq!(action.describe(&field), "Conan attacks Gandalf for 43 damage");

        action.undo(&mut field).unwrap();
        assert_eq!(field.get(GANDALF).unwrap().health(), 80);
    }

    #[test]
    fn failed_attack_changes_nothing() {
        let mut field = field(3);
        let mut action = Action::attack(GANDALF, CONAN);

        let err = action.execute(&mut field).unwrap_err();

        assert!(matches!(err, CombatError::InsufficientResource { .. }));
        assert_eq!(action.applied(), None);
        assert_eq!(field.get(CONAN).unwrap().health(), 150);
        assert_eq!(field.get(GANDALF).unwrap().stats().mana(), 3);
    }

    #[test]
    fn attack_on_self_is_rejected() {
        let mut field = field(100);
        let err = Action::attack(CONAN, CONAN).execute(&mut field).unwrap_err();
        assert_eq!(err, CombatError::SameCombatant(CONAN));
    }

    #[test]
    fn heal_caps_at_max_and_undo_restores() {
        let mut field = field(100);
        field.get_mut(GANDALF).unwrap().set_health(70);
        let mut action = Action::heal(GANDALF, 30);
        assert_eq!(action.describe(&field), "heal Gandalf for 30");

        action.execute(&mut field).unwrap();
        assert_eq!(field.get(GANDALF).unwrap().health(), 80);
        assert_eq!(action.describe(&field), "Gandalf is healed for 10");

        action.undo(&mut field).unwrap();
        assert_eq!(field.get(GANDALF).unwrap().health(), 70);
    }

    #[test]
    fn unexecuted_undo_is_a_no_op() {
        let mut field = field(100);
        field.get_mut(GANDALF).unwrap().set_health(50);

        Action::heal(GANDALF, 30).undo(&mut field).unwrap();

        assert_eq!(field.get(GANDALF).unwrap().health(), 50);
    }
}
