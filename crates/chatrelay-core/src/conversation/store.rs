//! ConversationStore -- per-session message history over a `KvStore`.
//!
//! Each session is one KV entry under `session:{id}` holding the JSON array
//! of its messages in insertion order. Reads touch only that key and delete
//! is a single key removal.
//!
//! Append is read-modify-write with no locking; concurrent appends to the
//! same session from different clients may interleave.

use chatrelay_types::error::ConversationError;
use chatrelay_types::message::{Message, SessionId};
use tracing::debug;

use crate::storage::kv_store::KvStore;

/// Owns the mapping from session id to ordered message sequence.
///
/// Generic over `KvStore` so that chatrelay-core never depends on
/// chatrelay-infra; callers only ever receive owned snapshots.
pub struct ConversationStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> ConversationStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Access the underlying key-value store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Append a message, creating the session if it does not exist yet.
    pub async fn append(
        &self,
        session_id: &SessionId,
        message: Message,
    ) -> Result<(), ConversationError> {
        let key = session_id.storage_key();
        let mut history = self.load(&key).await?;
        history.push(message);

        let value = serde_json::to_value(&history).map_err(|e| {
            ConversationError::StorageUnavailable(format!("failed to serialize history: {e}"))
        })?;
        self.kv.put(&key, &value).await?;

        debug!(session_id = %session_id, len = history.len(), "Message appended");
        Ok(())
    }

    /// All messages of a session in insertion order; empty if none exist.
    pub async fn get_history(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Message>, ConversationError> {
        self.load(&session_id.storage_key()).await
    }

    /// Remove every message of a session. Deleting an absent session succeeds.
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<(), ConversationError> {
        self.kv.delete(&session_id.storage_key()).await?;
        debug!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    /// Ids of all sessions that currently hold messages.
    pub async fn list_sessions(&self) -> Result<Vec<SessionId>, ConversationError> {
        let keys = self.kv.list_keys(SessionId::KEY_PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|key| SessionId::from_storage_key(key))
            .collect())
    }

    async fn load(&self, key: &str) -> Result<Vec<Message>, ConversationError> {
        match self.kv.get(key).await? {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                ConversationError::StorageUnavailable(format!("unreadable history at '{key}': {e}"))
            }),
        }
    }
}
