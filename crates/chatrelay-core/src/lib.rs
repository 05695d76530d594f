//! Conversation logic and port trait definitions for chatrelay.
//!
//! This crate defines the "ports" (`KvStore`, `InferenceProvider`) that the
//! infrastructure layer implements, plus the conversation store and reply
//! orchestrator built on top of them. It depends only on `chatrelay-types`
//! -- never on `chatrelay-infra` or any database/IO crate.

pub mod conversation;
pub mod inference;
pub mod storage;
