//! Turn orchestration for deterministic skirmish matches.
//!
//! This crate wires the decision-agent abstraction, the agent registry, and
//! the event bus around `game-core`'s combat model. Hosts build a
//! [`MatchController`], bind an agent to every combatant, and call
//! [`MatchController::run`].
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the match state machine and its builder
//! - [`api`] exposes the agent capability, registry, and error types
//! - [`agents`] provides the built-in agents and the fallback decision
//! - [`events`] provides a topic-based event bus for rendering
//! - [`config`] holds per-match settings
pub mod agents;
pub mod api;
pub mod config;
pub mod controller;
pub mod events;

pub use agents::{
    ChannelAgent, ChannelMessage, ReasoningBackend, RemoteAgent, RemoteDecision, RuleBasedAgent,
    fallback_action,
};
pub use api::{AgentRegistry, DecisionAgent, DecisionContext, Result, RuntimeError};
pub use config::MatchConfig;
pub use controller::{
    MatchController, MatchControllerBuilder, MatchOutcome, MatchReport, Survivor, TurnOutcome,
};
pub use events::{EventBus, MatchEvent, Topic};
