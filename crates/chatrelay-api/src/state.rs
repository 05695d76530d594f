//! Application state wiring the conversation services together.
//!
//! The orchestrator is generic over its KV store and inference provider;
//! AppState pins both to boxed trait objects so the storage backend can be
//! chosen at startup and tests can substitute in-memory parts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chatrelay_core::conversation::orchestrator::ReplyOrchestrator;
use chatrelay_core::conversation::store::ConversationStore;
use chatrelay_core::inference::box_provider::BoxInferenceProvider;
use chatrelay_core::storage::box_kv::BoxKvStore;
use chatrelay_core::storage::memory::InMemoryKvStore;
use chatrelay_infra::config::ENV_INFERENCE_API_KEY;
use chatrelay_infra::inference::build_provider;
use chatrelay_infra::inference::disabled::DisabledProvider;
use chatrelay_infra::sqlite::kv::SqliteKvStore;
use chatrelay_infra::sqlite::pool::{DatabasePool, database_url};
use chatrelay_types::config::{RelayConfig, StorageBackend};
use secrecy::SecretString;

/// Concrete orchestrator type shared by CLI commands and HTTP handlers.
pub type ConcreteOrchestrator = ReplyOrchestrator<BoxKvStore, BoxInferenceProvider>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub config: Arc<RelayConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: open storage, configure inference.
    pub async fn init(data_dir: &Path, config: RelayConfig) -> anyhow::Result<Self> {
        let kv = open_kv_store(data_dir, config.storage.backend).await?;

        let api_key = std::env::var(ENV_INFERENCE_API_KEY)
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);
        let provider = build_provider(&config.inference, api_key);

        Ok(Self::from_parts(kv, provider, config, data_dir.to_path_buf()))
    }

    /// Storage-only state for CLI commands that never call the model.
    pub async fn init_offline(data_dir: &Path, config: RelayConfig) -> anyhow::Result<Self> {
        let kv = open_kv_store(data_dir, config.storage.backend).await?;
        let provider = BoxInferenceProvider::new(DisabledProvider::new(
            "inference is not available to offline commands",
        ));
        Ok(Self::from_parts(kv, provider, config, data_dir.to_path_buf()))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        kv: BoxKvStore,
        provider: BoxInferenceProvider,
        config: RelayConfig,
        data_dir: PathBuf,
    ) -> Self {
        let orchestrator = ReplyOrchestrator::new(ConversationStore::new(kv), provider);
        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// Session history store.
    pub fn store(&self) -> &ConversationStore<BoxKvStore> {
        self.orchestrator.store()
    }
}

/// Open the configured KV backend, creating the data directory for SQLite.
async fn open_kv_store(data_dir: &Path, backend: StorageBackend) -> anyhow::Result<BoxKvStore> {
    let kv = match backend {
        StorageBackend::Sqlite => {
            tokio::fs::create_dir_all(data_dir).await?;
            let pool = DatabasePool::new(&database_url(data_dir)).await?;
            tracing::debug!(data_dir = %data_dir.display(), "SQLite storage opened");
            BoxKvStore::new(SqliteKvStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage; history is lost on exit");
            BoxKvStore::new(InMemoryKvStore::new())
        }
    };
    Ok(kv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_core::inference::provider::InferenceProvider;
    use chatrelay_types::message::{Message, SessionId};
    use tempfile::TempDir;

    #[tokio::test]
    async fn sqlite_state_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let id = SessionId::new("persist");

        let state = AppState::init_offline(tmp.path(), RelayConfig::default())
            .await
            .unwrap();
        state.store().append(&id, Message::user("kept")).await.unwrap();
        drop(state);

        let state = AppState::init_offline(tmp.path(), RelayConfig::default())
            .await
            .unwrap();
        let history = state.store().get_history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "kept");
        assert!(tmp.path().join("chatrelay.db").exists());
    }

    #[tokio::test]
    async fn memory_backend_touches_no_files() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("unused");
        let mut config = RelayConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let state = AppState::init_offline(&data_dir, config).await.unwrap();
        assert!(state.store().list_sessions().await.unwrap().is_empty());
        assert!(!data_dir.exists());
        assert_eq!(state.orchestrator.provider().name(), "disabled");
    }
}
