//! Text commands of the form `<verb> <combatant name>`.
//!
//! Shared by the agents that receive free text: human input lines and remote
//! reasoning responses. Names resolve case-insensitively against the living
//! combatants of the right team.

use game_core::{Action, CombatConfig};

use crate::api::{DecisionContext, Result, RuntimeError};

/// Splits `"attack legolas"` into `("attack", "legolas")`.
///
/// The target is everything after the first run of whitespace, so names may
/// contain spaces. Returns `None` when either part is missing.
pub fn parse_command(line: &str) -> Option<(&str, &str)> {
    let (verb, target) = line.trim().split_once(char::is_whitespace)?;
    let target = target.trim();
    (!target.is_empty()).then_some((verb, target))
}

/// Maps a verb and a target name onto an action for `ctx.actor`.
///
/// `attack` targets a living enemy, `heal` a living ally (the actor
/// included). Anything else is an [`RuntimeError::UnresolvableDecision`]
/// attributed to `agent`.
pub fn resolve_command(
    agent: &str,
    verb: &str,
    target: &str,
    ctx: &DecisionContext<'_>,
) -> Result<Action> {
    let team = ctx.actor.team;
    let verb = verb.trim();

    if verb.eq_ignore_ascii_case("attack") {
        let target = ctx
            .field
            .find_living_by_name(team.opponent(), target)
            .ok_or_else(|| {
                RuntimeError::unresolvable(agent, format!("no living enemy named {target:?}"))
            })?;
        Ok(Action::attack(ctx.actor, target))
    } else if verb.eq_ignore_ascii_case("heal") {
        let target = ctx.field.find_living_by_name(team, target).ok_or_else(|| {
            RuntimeError::unresolvable(agent, format!("no living ally named {target:?}"))
        })?;
        Ok(Action::heal(target, CombatConfig::HEAL_AMOUNT))
    } else {
        Err(RuntimeError::unresolvable(
            agent,
            format!("unknown action {verb:?}"),
        ))
    }
}
