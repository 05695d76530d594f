//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `chatrelay-core` using sqlx with split read/write pools.
//! Values are stored as JSON text and deserialized on read.

use chatrelay_core::storage::kv_store::KvStore;
use chatrelay_types::error::RepositoryError;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| RepositoryError::Query(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, RepositoryError> {
        // Exact, case-sensitive prefix match; LIKE is neither.
        let rows = sqlx::query("SELECT key FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key")
            .bind(prefix)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url};
    use chatrelay_core::conversation::store::ConversationStore;
    use chatrelay_types::message::{Message, SessionId};
    use serde_json::json;

    async fn test_store() -> (SqliteKvStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();
        (SqliteKvStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, _dir) = test_store().await;

        let value = json!([{"role": "user", "content": "hi", "timestamp": 1}]);
        store.put("session:a", &value).await.unwrap();

        assert_eq!(store.get("session:a").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _dir) = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let (store, _dir) = test_store().await;

        store.put("counter", &json!(1)).await.unwrap();
        store.put("counter", &json!(2)).await.unwrap();

        assert_eq!(store.get("counter").await.unwrap(), Some(json!(2)));
        assert_eq!(store.list_keys("").await.unwrap(), vec!["counter"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, _dir) = test_store().await;

        store.put("temp", &json!("value")).await.unwrap();
        store.delete("temp").await.unwrap();

        assert!(store.get("temp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let (store, _dir) = test_store().await;

        // Should not error
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_by_prefix() {
        let (store, _dir) = test_store().await;

        store.put("session:beta", &json!([])).await.unwrap();
        store.put("session:alpha", &json!([])).await.unwrap();
        store.put("settings", &json!({})).await.unwrap();

        let keys = store.list_keys("session:").await.unwrap();
        assert_eq!(keys, vec!["session:alpha", "session:beta"]);
    }

    #[tokio::test]
    async fn test_list_keys_prefix_is_exact() {
        let (store, _dir) = test_store().await;

        store.put("a_1", &json!(1)).await.unwrap();
        store.put("ab1", &json!(2)).await.unwrap();
        store.put("a%2", &json!(3)).await.unwrap();

        assert_eq!(store.list_keys("a_").await.unwrap(), vec!["a_1"]);
        assert_eq!(store.list_keys("a%").await.unwrap(), vec!["a%2"]);
        assert!(store.list_keys("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conversation_store_over_sqlite() {
        let (kv, _dir) = test_store().await;
        let store = ConversationStore::new(kv);
        let sid = SessionId::new("abc");

        store.append(&sid, Message::user("hello")).await.unwrap();
        store.append(&sid, Message::assistant("hi")).await.unwrap();

        let history = store.get_history(&sid).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi"]);

        store.delete_session(&sid).await.unwrap();
        store.delete_session(&sid).await.unwrap();
        assert!(store.get_history(&sid).await.unwrap().is_empty());
    }
}
