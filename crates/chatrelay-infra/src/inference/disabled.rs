//! Provider used when the inference endpoint is not configured.

use chatrelay_core::inference::provider::InferenceProvider;
use chatrelay_types::inference::{InferenceError, InferenceOutput};
use chatrelay_types::message::MessageView;

/// Fails every request with the configuration problem that disabled it.
#[derive(Debug, Clone)]
pub struct DisabledProvider {
    reason: String,
}

impl DisabledProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl InferenceProvider for DisabledProvider {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(
        &self,
        _history: &[MessageView],
        _new_message: &str,
    ) -> Result<InferenceOutput, InferenceError> {
        Err(InferenceError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_fails_with_reason() {
        let provider = DisabledProvider::new("no account id");
        let err = provider.generate(&[], "hi").await.unwrap_err();
        assert!(matches!(err, InferenceError::Configuration(ref m) if m == "no account id"));
    }
}
