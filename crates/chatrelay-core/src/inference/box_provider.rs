//! BoxInferenceProvider -- object-safe dynamic dispatch wrapper for
//! InferenceProvider.
//!
//! Follows the same blanket-impl pattern as [`crate::storage::box_kv`].

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::inference::{InferenceError, InferenceOutput};
use chatrelay_types::message::MessageView;

use super::provider::InferenceProvider;

/// Object-safe version of [`InferenceProvider`] with boxed futures.
pub trait InferenceProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        history: &'a [MessageView],
        new_message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<InferenceOutput, InferenceError>> + Send + 'a>>;
}

impl<T: InferenceProvider> InferenceProviderDyn for T {
    fn name(&self) -> &str {
        InferenceProvider::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        history: &'a [MessageView],
        new_message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<InferenceOutput, InferenceError>> + Send + 'a>> {
        Box::pin(self.generate(history, new_message))
    }
}

/// Type-erased inference provider, so the HTTP layer can be wired with the
/// real client in production and a scripted one in tests.
pub struct BoxInferenceProvider {
    inner: Box<dyn InferenceProviderDyn + Send + Sync>,
}

impl BoxInferenceProvider {
    pub fn new<T: InferenceProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl InferenceProvider for BoxInferenceProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(
        &self,
        history: &[MessageView],
        new_message: &str,
    ) -> Result<InferenceOutput, InferenceError> {
        self.inner.generate_boxed(history, new_message).await
    }
}
