//! Inference provider abstraction.
//!
//! The hosted model is an opaque remote function: given the prior
//! conversation and a new user message, it produces some output.
//! Implementations live in chatrelay-infra.

pub mod box_provider;
pub mod provider;
