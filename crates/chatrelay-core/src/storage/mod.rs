//! Storage abstractions for chatrelay.
//!
//! Defines the key-value primitive the conversation store persists through,
//! a type-erased wrapper for runtime backend selection, and a process-local
//! implementation. Durable implementations live in chatrelay-infra.

pub mod box_kv;
pub mod kv_store;
pub mod memory;
