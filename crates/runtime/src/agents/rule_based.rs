use async_trait::async_trait;
use game_core::{Action, CombatConfig, below_percent, lowest_health};

use crate::api::{DecisionAgent, DecisionContext, Result, RuntimeError};

/// Deterministic agent evaluating three rules in priority order:
///
/// 1. heal itself below 30% health
/// 2. heal the most wounded ally below 20% health
/// 3. attack the living enemy with the lowest health
///
/// Thresholds are strict and ties go to the earlier roster slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedAgent;

impl RuleBasedAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DecisionAgent for RuleBasedAgent {
    async fn decide(&self, ctx: &DecisionContext<'_>) -> Result<Action> {
        let me = ctx.me()?;
        let heal = CombatConfig::HEAL_AMOUNT;

        if below_percent(
            me.health(),
            me.stats().max_health(),
            CombatConfig::SELF_HEAL_PERCENT,
        ) {
            tracing::debug!(actor = me.name(), "self-preservation heal");
            return Ok(Action::heal(ctx.actor, heal));
        }

        let wounded = ctx.allies().into_iter().filter(|(id, ally)| {
            *id != ctx.actor
                && below_percent(
                    ally.health(),
                    ally.stats().max_health(),
                    CombatConfig::ALLY_RESCUE_PERCENT,
                )
        });
        if let Some(ally) = lowest_health(wounded) {
            tracing::debug!(actor = me.name(), ally = %ally, "ally rescue heal");
            return Ok(Action::heal(ally, heal));
        }

        let target = lowest_health(ctx.enemies())
            .ok_or_else(|| RuntimeError::unresolvable(self.name(), "no living enemy"))?;
        tracing::debug!(actor = me.name(), target = %target, "focus fire");
        Ok(Action::attack(ctx.actor, target))
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}
