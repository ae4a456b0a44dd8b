//! Match configuration.
use std::env;
use std::time::Duration;

use crate::api::{Result, RuntimeError};

/// Settings for one match run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Upper bound on a single agent decision before the fallback is used.
    pub decision_timeout: Duration,
    /// Rounds played before the match ends without a winner.
    pub max_rounds: u32,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            decision_timeout: Duration::from_secs(5),
            max_rounds: 500,
            event_buffer_size: 100,
        }
    }
}

impl MatchConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DECISION_TIMEOUT_MS` - Per-decision timeout (default: 5000)
    /// - `SKIRMISH_MAX_ROUNDS` - Round limit (default: 500)
    /// - `SKIRMISH_EVENT_BUFFER` - Event buffer per topic (default: 100)
    ///
    /// Unset or unparseable values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("SKIRMISH_DECISION_TIMEOUT_MS") {
            config.decision_timeout = Duration::from_millis(ms);
        }
        if let Some(rounds) = read_env::<u32>("SKIRMISH_MAX_ROUNDS") {
            config.max_rounds = rounds;
        }
        if let Some(size) = read_env::<usize>("SKIRMISH_EVENT_BUFFER") {
            config.event_buffer_size = size;
        }

        config
    }

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Rejects settings under which a match cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.decision_timeout.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "decision timeout must be positive".into(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max rounds must be at least 1".into(),
            ));
        }
        if self.event_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "event buffer size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
