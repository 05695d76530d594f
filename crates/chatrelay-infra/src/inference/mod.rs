//! Inference provider implementations.

pub mod disabled;
pub mod http;

use chatrelay_core::inference::box_provider::BoxInferenceProvider;
use chatrelay_types::config::InferenceConfig;
use secrecy::SecretString;

use self::disabled::DisabledProvider;
use self::http::HttpInferenceProvider;

/// Build the provider the server relays to.
///
/// A configuration problem does not stop the server: it is logged once and
/// every message then fails with an inference error carrying the reason.
pub fn build_provider(config: &InferenceConfig, api_key: Option<SecretString>) -> BoxInferenceProvider {
    match HttpInferenceProvider::new(config, api_key) {
        Ok(provider) => {
            tracing::info!(endpoint = %provider.endpoint(), "Inference provider configured");
            BoxInferenceProvider::new(provider)
        }
        Err(e) => {
            tracing::warn!("Inference disabled: {e}");
            BoxInferenceProvider::new(DisabledProvider::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_core::inference::provider::InferenceProvider;

    #[test]
    fn missing_account_id_builds_disabled_provider() {
        let provider = build_provider(&InferenceConfig::default(), None);
        assert_eq!(provider.name(), "disabled");
    }

    #[test]
    fn explicit_endpoint_builds_http_provider() {
        let config = InferenceConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
            ..Default::default()
        };
        let provider = build_provider(&config, None);
        assert_eq!(provider.name(), "http");
    }
}
