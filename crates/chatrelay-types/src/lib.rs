//! Shared domain types for chatrelay.
//!
//! Messages, session identifiers, inference response shapes, configuration
//! and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod inference;
pub mod message;
