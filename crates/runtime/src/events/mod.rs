//! Topic-based event bus for match events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Hosts use this for rendering; the match itself never
//! reads events back.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::MatchEvent;
