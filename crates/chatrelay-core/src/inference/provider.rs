//! InferenceProvider trait definition.

use chatrelay_types::inference::{InferenceError, InferenceOutput};
use chatrelay_types::message::MessageView;

/// Trait for hosted inference backends.
///
/// `generate` receives the stored history (oldest first) and the new user
/// message, and returns the provider's raw output. Normalizing that output
/// to reply text is the caller's job ([`InferenceOutput::into_reply`]).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait InferenceProvider: Send + Sync {
    /// Human-readable provider name (e.g., "workers-ai").
    fn name(&self) -> &str;

    /// Run one inference call. No retries are performed.
    fn generate(
        &self,
        history: &[MessageView],
        new_message: &str,
    ) -> impl std::future::Future<Output = Result<InferenceOutput, InferenceError>> + Send;
}
