//! Session-scoped conversation history and the reply flow built on it.

pub mod orchestrator;
pub mod store;
