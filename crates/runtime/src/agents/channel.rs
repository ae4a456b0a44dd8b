use async_trait::async_trait;
use game_core::Action;
use tokio::sync::{Mutex, mpsc};

use super::command::{parse_command, resolve_command};
use crate::api::{DecisionAgent, DecisionContext, Result, RuntimeError};

/// Message a [`ChannelAgent`] turns into the acting combatant's action.
pub trait ChannelMessage: Send + 'static {
    fn into_action(self, agent: &str, ctx: &DecisionContext<'_>) -> Result<Action>;
}

impl ChannelMessage for Action {
    fn into_action(self, _agent: &str, ctx: &DecisionContext<'_>) -> Result<Action> {
        if let Some(actor) = self.actor()
            && actor != ctx.actor
        {
            tracing::warn!(
                "Received action for combatant {}, but expected {}",
                actor,
                ctx.actor
            );
        }
        Ok(self)
    }
}

/// A typed line such as `attack legolas` or `heal Gandalf`.
impl ChannelMessage for String {
    fn into_action(self, agent: &str, ctx: &DecisionContext<'_>) -> Result<Action> {
        let (verb, target) = parse_command(&self).ok_or_else(|| {
            RuntimeError::unresolvable(
                agent,
                format!("expected `attack <name>` or `heal <name>`, got {self:?}"),
            )
        })?;
        resolve_command(agent, verb, target, ctx)
    }
}

/// Agent that waits for messages pushed by the host.
///
/// Used for human input or scripted play: the host keeps the sender and
/// submits one message per turn, either a ready [`Action`] or a text command.
/// A closed channel is reported as [`RuntimeError::AgentChannelClosed`].
pub struct ChannelAgent<M = Action> {
    /// Receiver for host messages (wrapped in Mutex for interior mutability)
    rx_action: Mutex<mpsc::Receiver<M>>,
    name: String,
}

impl<M: ChannelMessage> ChannelAgent<M> {
    pub fn new(rx_action: mpsc::Receiver<M>) -> Self {
        Self::named("channel", rx_action)
    }

    pub fn named(name: impl Into<String>, rx_action: mpsc::Receiver<M>) -> Self {
        Self {
            rx_action: Mutex::new(rx_action),
            name: name.into(),
        }
    }

    /// Creates an agent together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<M>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl<M: ChannelMessage> DecisionAgent for ChannelAgent<M> {
    async fn decide(&self, ctx: &DecisionContext<'_>) -> Result<Action> {
        let mut rx = self.rx_action.lock().await;

        match rx.recv().await {
            Some(message) => message.into_action(&self.name, ctx),
            None => Err(RuntimeError::AgentChannelClosed),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
