//! Human seats: combatants whose turns are typed on stdin.
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use game_core::Combatant;
use runtime::{AgentRegistry, DecisionAgent};
use tokio::sync::mpsc;

/// Decision timeout used when a human plays and none is configured.
pub const HUMAN_DECISION_TIMEOUT: Duration = Duration::from_secs(120);

/// Parse a comma separated list of combatant names, folded to lowercase.
pub fn parse_humans(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn is_human(humans: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    humans.iter().any(|human| *human == name)
}

/// Bind human seats to `human` and everyone else to `ai`.
///
/// Every name in `humans` must match a combatant on either roster.
pub fn assign_agents<'a>(
    combatants: impl IntoIterator<Item = &'a Combatant>,
    humans: &[String],
    human: Arc<dyn DecisionAgent>,
    ai: Arc<dyn DecisionAgent>,
) -> Result<AgentRegistry> {
    let mut registry = AgentRegistry::new();
    let mut seated = Vec::new();

    for combatant in combatants {
        if is_human(humans, combatant.name()) {
            seated.push(combatant.name().to_lowercase());
            registry.bind_combatant(combatant, Arc::clone(&human));
        } else {
            registry.bind_combatant(combatant, Arc::clone(&ai));
        }
    }

    if let Some(missing) = humans.iter().find(|name| !seated.contains(name)) {
        bail!("SKIRMISH_HUMAN names '{missing}', who is on neither roster");
    }
    Ok(registry)
}

/// Forward stdin lines to `tx` until either side closes.
///
/// Runs on a plain thread: a blocking read must not hold a runtime worker
/// or delay shutdown.
pub fn spawn_stdin_reader(tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        tracing::debug!("stdin reader stopped");
    });
}
