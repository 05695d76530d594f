//! HttpInferenceProvider -- [`InferenceProvider`] over a hosted chat endpoint.
//!
//! Speaks the `{ messages: [{role, content}] }` request format shared by
//! Workers AI (`/ai/run/{model}`) and OpenAI-compatible
//! `/chat/completions` endpoints. The response body is handed on as an
//! [`InferenceOutput`]; a Workers AI `{ success, result }` envelope is
//! unwrapped first.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use chatrelay_core::inference::provider::InferenceProvider;
use chatrelay_types::config::InferenceConfig;
use chatrelay_types::inference::{InferenceError, InferenceOutput};
use chatrelay_types::message::{MessageRole, MessageView};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

/// Request body sent to the endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    /// Omitted when the model is already part of the URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<MessageView>,
}

/// Inference provider for Workers AI and OpenAI-compatible HTTP endpoints.
///
/// No request timeout is configured and no retries are attempted.
pub struct HttpInferenceProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    model_in_path: bool,
    system_prompt: String,
    api_key: Option<SecretString>,
}

// HttpInferenceProvider intentionally does NOT derive Debug so the API key
// can never end up in log output.

impl HttpInferenceProvider {
    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Configuration`] when the endpoint template
    /// needs an account id that is not configured.
    pub fn new(config: &InferenceConfig, api_key: Option<SecretString>) -> Result<Self, InferenceError> {
        let endpoint = config.resolved_endpoint().ok_or_else(|| {
            InferenceError::Configuration(
                "endpoint contains {account_id} but no account id is set (CHATRELAY_ACCOUNT_ID)"
                    .to_string(),
            )
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            model: config.model.clone(),
            model_in_path: config.endpoint.contains("{model}"),
            system_prompt: config.system_prompt.clone(),
            api_key,
        })
    }

    /// The fully resolved endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, history: &[MessageView], new_message: &str) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 2);

        if !self.system_prompt.is_empty() {
            messages.push(MessageView {
                role: MessageRole::System,
                content: self.system_prompt.clone(),
            });
        }
        messages.extend_from_slice(history);
        messages.push(MessageView {
            role: MessageRole::User,
            content: new_message.to_string(),
        });

        ChatRequest {
            model: (!self.model_in_path).then_some(self.model.as_str()),
            messages,
        }
    }
}

/// Strip a Workers AI REST envelope, surfacing `success: false` as an error.
fn unwrap_envelope(body: serde_json::Value) -> Result<serde_json::Value, InferenceError> {
    let serde_json::Value::Object(mut map) = body else {
        return Ok(body);
    };

    match map.get("success") {
        Some(serde_json::Value::Bool(false)) => {
            let errors = map
                .get("errors")
                .map(|e| e.to_string())
                .unwrap_or_else(|| "[]".to_string());
            Err(InferenceError::Provider {
                message: format!("endpoint reported failure: {errors}"),
            })
        }
        Some(serde_json::Value::Bool(true)) if map.contains_key("result") => {
            Ok(map.remove("result").unwrap_or(serde_json::Value::Null))
        }
        _ => Ok(serde_json::Value::Object(map)),
    }
}

impl InferenceProvider for HttpInferenceProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(
        &self,
        history: &[MessageView],
        new_message: &str,
    ) -> Result<InferenceOutput, InferenceError> {
        let body = self.build_request(history, new_message);
        debug!(
            endpoint = %self.endpoint,
            messages = body.messages.len(),
            "Sending inference request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| InferenceError::Provider {
            message: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| InferenceError::Provider {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => InferenceError::AuthenticationFailed,
                429 => InferenceError::RateLimited,
                _ => InferenceError::Provider {
                    message: format!("HTTP {status}: {text}"),
                },
            });
        }

        // Non-JSON bodies are taken as the reply text itself.
        let value = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => unwrap_envelope(value)?,
            Err(_) => serde_json::Value::String(text),
        };

        Ok(InferenceOutput::from_value(value))
    }
}
