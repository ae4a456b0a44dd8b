//! Built-in decision agents.
//!
//! - [`RuleBasedAgent`]: fixed priority rules, fully deterministic
//! - [`ChannelAgent`]: actions or text commands pushed in by a host (human
//!   input, scripts)
//! - [`RemoteAgent`]: free-text reasoning service behind [`ReasoningBackend`]
//!
//! [`fallback_action`] is the substitute the controller uses whenever an
//! agent fails.

mod channel;
mod command;
mod fallback;
mod remote;
mod rule_based;

pub use channel::{ChannelAgent, ChannelMessage};
pub use command::{parse_command, resolve_command};
pub use fallback::fallback_action;
pub use remote::{ReasoningBackend, RemoteAgent, RemoteDecision, build_prompt, extract_json};
pub use rule_based::RuleBasedAgent;
