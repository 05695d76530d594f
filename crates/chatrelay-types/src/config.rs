//! Configuration types for chatrelay.
//!
//! `RelayConfig` represents the top-level `config.toml`. Every field has a
//! default so an empty or missing file yields a runnable server.

use serde::{Deserialize, Serialize};

/// Default system prompt prepended to every inference request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Only answer the user's message. \
Do not greet, introduce yourself, provide examples, or include any unrelated information. \
Respond strictly to the message.";

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub inference: InferenceConfig,
}

/// HTTP listener and static asset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for every path the API does not claim.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_web_dir() -> String {
    "public".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

/// Which key-value primitive backs the conversation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Process-local map; history is lost on restart.
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Hosted inference endpoint settings.
///
/// `endpoint` may contain `{account_id}` and `{model}` placeholders.
/// The API key is never part of the file; it comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_endpoint() -> String {
    "https://api.cloudflare.com/client/v4/accounts/{account_id}/ai/run/{model}".to_string()
}

fn default_model() -> String {
    "@cf/mistral/mistral-7b-instruct-v0.1".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            account_id: None,
            system_prompt: default_system_prompt(),
        }
    }
}

impl InferenceConfig {
    /// The endpoint with placeholders substituted.
    ///
    /// Returns `None` when the endpoint needs an account id that is not set.
    pub fn resolved_endpoint(&self) -> Option<String> {
        let mut url = self.endpoint.replace("{model}", &self.model);
        if url.contains("{account_id}") {
            let account = self.account_id.as_deref().filter(|a| !a.is_empty())?;
            url = url.replace("{account_id}", account);
        }
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = RelayConfig::default();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.server.web_dir, "public");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.inference.model.starts_with("@cf/"));
    }

    #[test]
    fn test_deserialize_empty() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.inference.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: RelayConfig = toml::from_str(
            r#"
[server]
port = 9000

[storage]
backend = "memory"

[inference]
model = "gpt-4o-mini"
endpoint = "https://api.openai.com/v1/chat/completions"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.inference.model, "gpt-4o-mini");
    }

    #[test]
    fn test_resolved_endpoint_substitutes_placeholders() {
        let inference = InferenceConfig {
            account_id: Some("acct123".into()),
            ..Default::default()
        };
        assert_eq!(
            inference.resolved_endpoint().unwrap(),
            "https://api.cloudflare.com/client/v4/accounts/acct123/ai/run/@cf/mistral/mistral-7b-instruct-v0.1"
        );
    }

    #[test]
    fn test_resolved_endpoint_requires_account_id() {
        let inference = InferenceConfig::default();
        assert!(inference.resolved_endpoint().is_none());

        let blank = InferenceConfig {
            account_id: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.resolved_endpoint().is_none());
    }

    #[test]
    fn test_resolved_endpoint_without_placeholders() {
        let inference = InferenceConfig {
            endpoint: "http://localhost:11434/v1/chat/completions".into(),
            ..Default::default()
        };
        assert_eq!(
            inference.resolved_endpoint().unwrap(),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
