use game_core::{Action, Battlefield, CombatantId};

/// Deterministic substitute decision: attack the weakest living enemy.
///
/// Returns `None` only when the opposing team is already defeated.
pub fn fallback_action(field: &Battlefield, actor: CombatantId) -> Option<Action> {
    field
        .weakest_living_enemy(actor)
        .map(|target| Action::attack(actor, target))
}
