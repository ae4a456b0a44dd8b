//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the controller and agents can stay focused on orchestration.

pub mod agent;
pub mod errors;
pub mod registry;

pub use agent::{DecisionAgent, DecisionContext};
pub use errors::{Result, RuntimeError};
pub use registry::AgentRegistry;
