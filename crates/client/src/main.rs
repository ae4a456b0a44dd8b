//! Skirmish - match runner
//!
//! Builds two teams from archetype presets and plays the match to
//! completion. Combatants named in `SKIRMISH_HUMAN` take their turns from
//! stdin (`attack <name>` or `heal <name>`); everyone else is played by the
//! rule-based agent.
mod players;
mod roster;

use std::env;
use std::sync::Arc;

use anyhow::Result;
use game_core::TeamId;
use runtime::{
    ChannelAgent, DecisionAgent, MatchConfig, MatchController, MatchEvent, RuleBasedAgent, Topic,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::players::{
    HUMAN_DECISION_TIMEOUT, assign_agents, is_human, parse_humans, spawn_stdin_reader,
};
use crate::roster::{DEFAULT_TEAM_ONE, DEFAULT_TEAM_TWO, factory_from_env, roster_from_env};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Setup logging
    setup_logging();

    if let Err(err) = run().await {
        error!("match aborted: {err:#}");
        return Err(err);
    }
    Ok(())
}

async fn run() -> Result<()> {
    // 2. Load configuration from environment
    let humans = env::var("SKIRMISH_HUMAN")
        .map(|list| parse_humans(&list))
        .unwrap_or_default();
    let mut config = MatchConfig::from_env();
    if !humans.is_empty() && env::var_os("SKIRMISH_DECISION_TIMEOUT_MS").is_none() {
        config = config.with_decision_timeout(HUMAN_DECISION_TIMEOUT);
    }
    info!(
        timeout_ms = config.decision_timeout.as_millis() as u64,
        max_rounds = config.max_rounds,
        humans = humans.len(),
        "loaded match configuration"
    );

    // 3. Build rosters from presets
    let factory = factory_from_env()?;
    let team_one = roster_from_env(&factory, "SKIRMISH_TEAM_ONE", DEFAULT_TEAM_ONE)?;
    let team_two = roster_from_env(&factory, "SKIRMISH_TEAM_TWO", DEFAULT_TEAM_TWO)?;

    for combatant in team_one.iter().chain(&team_two) {
        println!("{combatant}");
    }

    // 4. Bind agents
    let ai: Arc<dyn DecisionAgent> = Arc::new(RuleBasedAgent::new());
    let human: Arc<dyn DecisionAgent> = if humans.is_empty() {
        Arc::clone(&ai)
    } else {
        let (tx, rx) = tokio::sync::mpsc::channel::<String>(16);
        spawn_stdin_reader(tx);
        Arc::new(ChannelAgent::named("human", rx))
    };
    let agents = assign_agents(team_one.iter().chain(&team_two), &humans, human, ai)?;

    // 5. Build the controller
    let mut controller = MatchController::builder()
        .config(config)
        .team(TeamId::One, team_one)
        .team(TeamId::Two, team_two)
        .agents(agents)
        .build()?;

    let renderer = tokio::spawn(render_events(
        controller.subscribe(Topic::Action),
        controller.subscribe(Topic::Turn),
        humans,
    ));

    // 6. Play
    let report = controller.run().await?;

    // Closing the bus ends the renderer once it has drained.
    drop(controller);
    renderer.await?;

    println!();
    print!("{report}");
    Ok(())
}

async fn render_events(
    mut actions: broadcast::Receiver<MatchEvent>,
    mut turns: broadcast::Receiver<MatchEvent>,
    humans: Vec<String>,
) {
    let (mut actions_open, mut turns_open) = (true, true);

    while actions_open || turns_open {
        tokio::select! {
            biased;
            event = actions.recv(), if actions_open => actions_open = render(event, &humans),
            event = turns.recv(), if turns_open => turns_open = render(event, &humans),
        }
    }
}

/// Prints one event. Returns `false` once the topic has closed.
fn render(event: Result<MatchEvent, RecvError>, humans: &[String]) -> bool {
    match event {
        Ok(MatchEvent::ActionExecuted {
            description, state, ..
        }) => println!("[{state}] {description}"),
        Ok(MatchEvent::FallbackApplied { agent, reason, .. }) => {
            println!("  ({agent} fell back: {reason})")
        }
        Ok(MatchEvent::TurnStarted { name, state, .. }) if is_human(humans, &name) => {
            println!("[{state}] {name}, your move (attack <name> | heal <name>):")
        }
        Ok(_) => {}
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "renderer lagged behind the match");
        }
        Err(RecvError::Closed) => return false,
    }
    true
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
