//! Inference request/response shapes.
//!
//! Hosted inference APIs answer in one of several shapes: a bare string, an
//! object with a `response` field (Workers AI), or an OpenAI-style
//! `choices[0].message.content`. [`InferenceOutput`] captures all of them and
//! [`InferenceOutput::into_reply`] is the only place they are told apart.

use serde::Deserialize;

/// Reply text used when the provider answered in a shape we cannot read.
pub const FALLBACK_REPLY: &str = "No response";

/// Raw provider output, before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InferenceOutput {
    Text(String),
    Response { response: String },
    Choices { choices: Vec<Choice> },
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl InferenceOutput {
    /// Classify an arbitrary JSON payload.
    pub fn from_value(value: serde_json::Value) -> Self {
        // The Unrecognized arm accepts any JSON, so this cannot fail.
        serde_json::from_value(value).unwrap_or(InferenceOutput::Unrecognized(serde_json::Value::Null))
    }

    /// Normalize to plain reply text, falling back to [`FALLBACK_REPLY`].
    pub fn into_reply(self) -> String {
        match self {
            InferenceOutput::Text(text) => text,
            InferenceOutput::Response { response } => response,
            InferenceOutput::Choices { choices } => choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content)
                .unwrap_or_else(|| FALLBACK_REPLY.to_string()),
            InferenceOutput::Unrecognized(_) => FALLBACK_REPLY.to_string(),
        }
    }
}

/// Errors from inference provider operations.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("provider misconfigured: {0}")]
    Configuration(String),
}
