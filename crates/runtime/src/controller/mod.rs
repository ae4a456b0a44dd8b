//! Match orchestration.
//!
//! [`MatchController`] owns both rosters, the agent bindings, the action log,
//! and the progress snapshot. A round is team one's full pass followed by
//! team two's; within a team, combatants act in roster order and defeated
//! ones are skipped. Game over is checked after every single turn.
//!
//! Agents are the only unreliable collaborator. Any failure at that boundary
//! (error, timeout, an action that does not fit the turn, or an action that
//! fails to execute) is replaced by the fallback attack on the weakest living
//! enemy. If the fallback cannot execute either, the turn is forfeited and
//! the match still moves on.

mod report;

pub use report::{MatchOutcome, MatchReport, Survivor};

use std::sync::Arc;

use game_core::{
    Action, ActionLog, Battlefield, Combatant, CombatantId, CombatantKey, MatchState, TeamId,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::agents::fallback_action;
use crate::api::{AgentRegistry, DecisionAgent, DecisionContext, Result, RuntimeError};
use crate::config::MatchConfig;
use crate::events::{EventBus, MatchEvent, Topic};

/// What happened on one combatant's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The combatant is defeated and did not act.
    Skipped,
    /// The agent's own action executed.
    Executed,
    /// The fallback action executed in place of the agent's.
    Fallback,
    /// Nothing executed; the turn counter still advanced.
    Forfeited,
}

/// Drives one match from the first turn to game over.
pub struct MatchController {
    config: MatchConfig,
    field: Battlefield,
    agents: AgentRegistry,
    log: ActionLog,
    state: MatchState,
    events: EventBus,
    outcome: Option<MatchOutcome>,
}

impl MatchController {
    /// Create a new controller builder
    pub fn builder() -> MatchControllerBuilder {
        MatchControllerBuilder::new()
    }

    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchEvent> {
        self.events.subscribe(topic)
    }

    /// Plays rounds until one team is defeated or the round limit is hit.
    ///
    /// # Errors
    ///
    /// Only configuration failures end a run early, chiefly
    /// [`RuntimeError::UnboundCombatant`]. Agent failures never do.
    pub async fn run(&mut self) -> Result<MatchReport> {
        if let Some(outcome) = self.outcome.or_else(|| self.check_game_over()) {
            return Ok(self.finish(outcome));
        }

        info!(
            team_one = self.field.roster(TeamId::One).len(),
            team_two = self.field.roster(TeamId::Two).len(),
            "match started"
        );

        loop {
            for team in [TeamId::One, TeamId::Two] {
                let order: Vec<CombatantId> = self.field.ids(team).collect();
                for actor in order {
                    self.process_turn(actor).await?;
                    if let Some(outcome) = self.check_game_over() {
                        return Ok(self.finish(outcome));
                    }
                }
            }

            let round = self.state.round;
            info!(round, "round completed");
            self.events.publish(MatchEvent::RoundCompleted { round });

            if round >= self.config.max_rounds {
                return Ok(self.finish(MatchOutcome::RoundLimit { rounds: round }));
            }
            self.state = self.state.next_round();
        }
    }

    /// Plays a single turn for `actor`.
    ///
    /// Defeated combatants are skipped without touching the turn counter.
    /// Every other outcome advances it and refreshes the undo fields.
    ///
    /// `can_undo` mirrors the log rather than being set after every turn: a
    /// forfeited turn with an empty log leaves it `false`, so the snapshot
    /// never advertises an undo that would fail with `NoHistory`.
    pub async fn process_turn(&mut self, actor: CombatantId) -> Result<TurnOutcome> {
        let combatant = self.field.get(actor)?;
        if !combatant.is_alive() {
            debug!(combatant = combatant.name(), "skipping defeated combatant");
            return Ok(TurnOutcome::Skipped);
        }

        let name = combatant.name().to_owned();
        let agent = self.agents.get(&combatant.key())?;

        debug!(combatant = %name, agent = agent.name(), state = %self.state, "turn started");
        self.events.publish(MatchEvent::TurnStarted {
            actor,
            name,
            state: self.state,
        });

        let decision = self
            .request_decision(Arc::clone(&agent), actor)
            .await
            .and_then(|action| self.validate(agent.name(), actor, action));

        let outcome = match decision {
            Ok(action) => match self.log.execute(action, &mut self.field).map(|_| ()) {
                Ok(()) => TurnOutcome::Executed,
                Err(error) => self.apply_fallback(agent.name(), actor, error.into()),
            },
            Err(error) => self.apply_fallback(agent.name(), actor, error),
        };

        self.state = self
            .state
            .next_turn()
            .with_undo(!self.log.is_empty(), self.log.len());

        if matches!(outcome, TurnOutcome::Executed | TurnOutcome::Fallback)
            && let Some(action) = self.log.last()
        {
            let description = action.describe(&self.field);
            info!(state = %self.state, "{description}");
            self.events.publish(MatchEvent::ActionExecuted {
                action: action.clone(),
                description,
                state: self.state,
            });
        }

        Ok(outcome)
    }

    /// Reverses the most recent logged action.
    ///
    /// # Errors
    ///
    /// `NoHistory` (wrapped in [`RuntimeError::Combat`]) when the log is
    /// empty. The match is unaffected.
    pub fn undo_last(&mut self) -> Result<Action> {
        let action = self.log.undo_last(&mut self.field)?;
        self.state = self
            .state
            .with_undo(!self.log.is_empty(), self.log.len());
        self.outcome = self.check_game_over();

        let description = action.describe(&self.field);
        info!(state = %self.state, "undone: {description}");
        self.events.publish(MatchEvent::ActionUndone {
            action: action.clone(),
            description,
            state: self.state,
        });
        Ok(action)
    }

    /// The outcome if either team is fully defeated right now.
    pub fn check_game_over(&self) -> Option<MatchOutcome> {
        match (
            self.field.is_defeated(TeamId::One),
            self.field.is_defeated(TeamId::Two),
        ) {
            (true, true) => Some(MatchOutcome::Draw),
            (true, false) => Some(MatchOutcome::Victory(TeamId::Two)),
            (false, true) => Some(MatchOutcome::Victory(TeamId::One)),
            (false, false) => None,
        }
    }

    /// Snapshot of the match as it stands.
    ///
    /// Before the match ends the outcome reads as a round limit at the
    /// current round.
    pub fn report(&self) -> MatchReport {
        let outcome = self.outcome.unwrap_or(MatchOutcome::RoundLimit {
            rounds: self.state.round,
        });
        MatchReport::new(outcome, self.state, self.log.len(), &self.field)
    }

    /// Runs the agent on its own task against a snapshot of the battlefield.
    ///
    /// The wait is bounded even when the agent blocks its thread instead of
    /// yielding; a late decision is discarded, never executed. Bounding a
    /// blocking agent needs a multi-threaded runtime.
    async fn request_decision(
        &self,
        agent: Arc<dyn DecisionAgent>,
        actor: CombatantId,
    ) -> Result<Action> {
        let name = agent.name().to_owned();
        let timeout = self.config.decision_timeout;
        let field = self.field.clone();
        let state = self.state;

        let mut task = tokio::spawn(async move {
            let ctx = DecisionContext::new(actor, &field, state);
            agent.decide(&ctx).await
        });

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(join_error)) => Err(RuntimeError::unresolvable(
                &name,
                format!("decision task failed: {join_error}"),
            )),
            Err(_) => {
                task.abort();
                Err(RuntimeError::AgentTimeout {
                    agent: name,
                    timeout,
                })
            }
        }
    }

    /// Checks that `action` belongs to this turn: the actor attacks a living
    /// enemy, or heals a living ally.
    fn validate(&self, agent: &str, actor: CombatantId, action: Action) -> Result<Action> {
        let fits = match &action {
            Action::Attack(attack) => {
                if attack.attacker != actor {
                    return Err(RuntimeError::unresolvable(
                        agent,
                        format!("attacker {} is not the active combatant", attack.attacker),
                    ));
                }
                attack.target.team != actor.team && self.is_living(attack.target)
            }
            Action::Heal(heal) => heal.target.team == actor.team && self.is_living(heal.target),
        };

        if fits {
            Ok(action)
        } else {
            Err(RuntimeError::unresolvable(
                agent,
                format!("{} is not a valid target", action.target()),
            ))
        }
    }

    fn is_living(&self, id: CombatantId) -> bool {
        self.field.get(id).is_ok_and(Combatant::is_alive)
    }

    fn apply_fallback(
        &mut self,
        agent: &str,
        actor: CombatantId,
        reason: RuntimeError,
    ) -> TurnOutcome {
        warn!(agent, combatant = %actor, %reason, "decision failed; applying fallback");
        self.events.publish(MatchEvent::FallbackApplied {
            actor,
            agent: agent.to_owned(),
            reason: reason.to_string(),
        });

        let Some(action) = fallback_action(&self.field, actor) else {
            return self.forfeit(actor, "no living enemy".to_owned());
        };
        match self.log.execute(action, &mut self.field).map(|_| ()) {
            Ok(()) => TurnOutcome::Fallback,
            Err(error) => self.forfeit(actor, error.to_string()),
        }
    }

    fn forfeit(&mut self, actor: CombatantId, reason: String) -> TurnOutcome {
        warn!(combatant = %actor, %reason, "fallback failed; turn forfeited");
        self.events.publish(MatchEvent::TurnForfeited { actor, reason });
        TurnOutcome::Forfeited
    }

    fn finish(&mut self, outcome: MatchOutcome) -> MatchReport {
        self.outcome = Some(outcome);
        info!(%outcome, state = %self.state, commands = self.log.len(), "game over");
        self.events.publish(MatchEvent::GameOver {
            outcome,
            state: self.state,
        });
        self.report()
    }
}

impl std::fmt::Debug for MatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("log_len", &self.log.len())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

/// Builder for [`MatchController`].
pub struct MatchControllerBuilder {
    config: MatchConfig,
    team_one: Vec<Combatant>,
    team_two: Vec<Combatant>,
    agents: AgentRegistry,
    events: Option<EventBus>,
}

impl MatchControllerBuilder {
    fn new() -> Self {
        Self {
            config: MatchConfig::default(),
            team_one: Vec::new(),
            team_two: Vec::new(),
            agents: AgentRegistry::new(),
            events: None,
        }
    }

    /// Override match configuration
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn team(mut self, team: TeamId, roster: Vec<Combatant>) -> Self {
        match team {
            TeamId::One => self.team_one = roster,
            TeamId::Two => self.team_two = roster,
        }
        self
    }

    /// Replace all agent bindings.
    pub fn agents(mut self, agents: AgentRegistry) -> Self {
        self.agents = agents;
        self
    }

    /// Bind one combatant key to an agent.
    pub fn bind(mut self, key: CombatantKey, agent: Arc<dyn DecisionAgent>) -> Self {
        self.agents.bind(key, agent);
        self
    }

    /// Bind every combatant currently on both rosters to `agent`.
    pub fn bind_all(mut self, agent: Arc<dyn DecisionAgent>) -> Self {
        let keys: Vec<CombatantKey> = self
            .team_one
            .iter()
            .chain(&self.team_two)
            .map(Combatant::key)
            .collect();
        for key in keys {
            self.agents.bind(key, Arc::clone(&agent));
        }
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the controller.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config or an empty roster.
    pub fn build(self) -> Result<MatchController> {
        self.config.validate()?;
        if self.team_one.is_empty() {
            return Err(RuntimeError::EmptyRoster { team: TeamId::One });
        }
        if self.team_two.is_empty() {
            return Err(RuntimeError::EmptyRoster { team: TeamId::Two });
        }
        warn_on_shared_keys(&self.team_one, &self.team_two);

        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        Ok(MatchController {
            config: self.config,
            field: Battlefield::new(self.team_one, self.team_two),
            agents: self.agents,
            log: ActionLog::new(),
            state: MatchState::initial(),
            events,
            outcome: None,
        })
    }
}

/// Combatants with equal keys share one agent binding.
fn warn_on_shared_keys(team_one: &[Combatant], team_two: &[Combatant]) {
    let mut seen = std::collections::HashSet::new();
    for combatant in team_one.iter().chain(team_two) {
        let key = combatant.key();
        if !seen.insert(key.clone()) {
            warn!(combatant = %key, "roster key appears more than once; entries share one agent");
        }
    }
}
