//! Remote reasoning agent boundary.
//!
//! The transport lives behind [`ReasoningBackend`]; this module owns the
//! prompt, the response contract, and name resolution. Every malformed or
//! unresolvable response becomes [`RuntimeError::UnresolvableDecision`] so
//! the controller can fall back.

use async_trait::async_trait;
use game_core::{Action, Archetype, CombatConfig, Combatant, CombatantId};
use serde::{Deserialize, Serialize};

use super::command::resolve_command;
use crate::api::{DecisionAgent, DecisionContext, Result, RuntimeError};

/// Free-text completion service (an LLM endpoint, a test double).
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Structured payload expected from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDecision {
    /// `"attack"` or `"heal"`, any case.
    pub action: String,
    /// Combatant name, matched case-insensitively.
    pub target: String,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Agent that asks a [`ReasoningBackend`] for a JSON decision.
pub struct RemoteAgent<B> {
    backend: B,
    name: String,
}

impl<B: ReasoningBackend> RemoteAgent<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            name: "remote".to_owned(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parses a raw backend response into a decision.
    pub fn parse(&self, response: &str) -> Result<RemoteDecision> {
        let json = extract_json(response)
            .ok_or_else(|| RuntimeError::unresolvable(&self.name, "no JSON object in response"))?;
        serde_json::from_str(json).map_err(|e| {
            RuntimeError::unresolvable(&self.name, format!("malformed decision: {e}"))
        })
    }

    /// Maps a decision onto a concrete action for `ctx.actor`.
    pub fn resolve(&self, decision: &RemoteDecision, ctx: &DecisionContext<'_>) -> Result<Action> {
        resolve_command(&self.name, &decision.action, &decision.target, ctx)
    }
}

#[async_trait]
impl<B: ReasoningBackend> DecisionAgent for RemoteAgent<B> {
    async fn decide(&self, ctx: &DecisionContext<'_>) -> Result<Action> {
        let prompt = build_prompt(ctx)?;
        let response = self.backend.complete(&prompt).await?;
        let decision = self.parse(&response)?;

        if let Some(reasoning) = &decision.reasoning {
            tracing::debug!(agent = %self.name, %reasoning, "remote decision");
        }
        self.resolve(&decision, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Extract a JSON object from a response that may carry surrounding text.
pub fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start < end).then(|| &response[start..=end])
}

/// Renders the decision prompt for the acting combatant.
pub fn build_prompt(ctx: &DecisionContext<'_>) -> Result<String> {
    let me = ctx.me()?;
    let stats = me.stats();
    let allies = ctx.allies();
    let enemies = ctx.enemies();

    let mut prompt = format!(
        "You are {}, a {} in a tactical battle.\n\n",
        me.name(),
        me.archetype()
    );

    prompt.push_str("YOUR STATUS:\n");
    prompt.push_str(&format!(
        "- HP: {}/{} ({}%)\n- Mana: {}/{}\n- Attack Power: {}\n- Defense: {}\n",
        stats.health(),
        stats.max_health(),
        stats.health_percent(),
        stats.mana(),
        stats.max_mana(),
        stats.attack_power(),
        stats.defense()
    ));
    prompt.push_str(&format!(
        "- Attack Strategy: {}\n- Defense Strategy: {}\n\n",
        me.damage_strategy(),
        me.mitigation_strategy()
    ));

    prompt.push_str("YOUR TEAM (Allies):\n");
    prompt.push_str(&roster_lines(&allies));
    prompt.push_str("\nENEMIES:\n");
    prompt.push_str(&roster_lines(&enemies));

    prompt.push_str("\nAVAILABLE ACTIONS:\n");
    if let Some(target) = ctx.field.weakest_living_enemy(ctx.actor) {
        let target = ctx.field.get(target)?;
        prompt.push_str(&format!(
            "1. attack <enemy_name> - Estimated damage to {}: ~{} HP\n",
            target.name(),
            estimate_damage(me, target)
        ));
    }
    prompt.push_str(&format!(
        "2. heal <ally_name> - Restores {} HP\n\n",
        CombatConfig::HEAL_AMOUNT
    ));

    prompt.push_str("TACTICAL GUIDANCE:\n");
    prompt.push_str("- Focus fire: attack wounded enemies to remove threats quickly\n");
    prompt.push_str("- Protect allies: heal teammates before they fall\n");
    prompt.push_str(&format!("- Your role: {}\n", role_hint(me.archetype())));
    prompt.push_str(&format!(
        "- Current turn: {}, Round: {}\n\n",
        ctx.state.turn, ctx.state.round
    ));

    prompt.push_str(
        "Respond ONLY with valid JSON in this exact format:\n\
         {\n  \"action\": \"attack\" | \"heal\",\n  \"target\": \"exact_character_name\",\n  \
         \"reasoning\": \"brief tactical explanation\"\n}\n\n",
    );
    prompt.push_str(&format!("Valid enemy names: {}\n", names(&enemies)));
    prompt.push_str(&format!("Valid ally names: {}", names(&allies)));

    Ok(prompt)
}

fn roster_lines(members: &[(CombatantId, &Combatant)]) -> String {
    members
        .iter()
        .map(|(_, c)| {
            let s = c.stats();
            format!(
                "  - {} ({}): {}/{} HP ({}%), {} ATK, {} DEF\n",
                c.name(),
                c.archetype(),
                s.health(),
                s.max_health(),
                s.health_percent(),
                s.attack_power(),
                s.defense()
            )
        })
        .collect()
}

fn names(members: &[(CombatantId, &Combatant)]) -> String {
    if members.is_empty() {
        return "none".to_owned();
    }
    members
        .iter()
        .map(|(_, c)| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn estimate_damage(attacker: &Combatant, target: &Combatant) -> i32 {
    attacker
        .damage_strategy()
        .compute_raw_damage(attacker.stats(), target.stats())
        .map(|roll| target.defend(roll.damage))
        .unwrap_or(0)
}

fn role_hint(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Warrior => "tank damage and protect weaker allies",
        Archetype::Mage => "deal high damage but protect yourself",
        Archetype::Archer => "pick off wounded enemies from range",
        Archetype::Rogue => "eliminate high-value enemies quickly",
    }
}
