//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! SQLite key-value storage, the HTTP inference client, and configuration
//! loading from the data directory.

pub mod config;
pub mod inference;
pub mod sqlite;
