//! Configuration loading for chatrelay.
//!
//! Reads `config.toml` from the data directory (`~/.chatrelay/` by default)
//! into [`RelayConfig`], then layers environment overrides on top. A missing
//! or malformed file falls back to defaults so the server always starts.

use std::path::{Path, PathBuf};

use chatrelay_types::config::RelayConfig;

/// Overrides `[server] web_dir`.
pub const ENV_WEB_DIR: &str = "CHATRELAY_WEB_DIR";
/// Overrides `[inference] account_id`.
pub const ENV_ACCOUNT_ID: &str = "CHATRELAY_ACCOUNT_ID";
/// Bearer token for the inference endpoint. Never read from the file.
pub const ENV_INFERENCE_API_KEY: &str = "CHATRELAY_INFERENCE_API_KEY";
/// Data directory holding `config.toml` and `chatrelay.db`.
pub const ENV_DATA_DIR: &str = "CHATRELAY_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATRELAY_DATA_DIR` environment variable
/// 2. `~/.chatrelay`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatrelay");
    }

    // Last resort: current directory
    PathBuf::from(".chatrelay")
}

/// Load configuration from `{data_dir}/config.toml` and apply environment
/// overrides.
pub async fn load_config(data_dir: &Path) -> RelayConfig {
    let config = load_config_file(data_dir).await;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Read and parse `{data_dir}/config.toml` without environment overrides.
///
/// - Missing file: [`RelayConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config_file(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

/// Layer environment variables over a parsed config.
///
/// `lookup` is `std::env::var` in production; tests pass a closure. Empty
/// values are ignored.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> RelayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(web_dir) = get(ENV_WEB_DIR) {
        config.server.web_dir = web_dir;
    }
    if let Some(account_id) = get(ENV_ACCOUNT_ID) {
        config.inference.account_id = Some(account_id);
    }

    config
}
