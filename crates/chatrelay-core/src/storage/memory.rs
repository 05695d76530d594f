//! In-memory `KvStore` backed by `DashMap`.
//!
//! Used by `chatrelay serve --memory` and as the fake store in tests.
//! Clones share the same underlying map.

use std::sync::Arc;

use chatrelay_types::error::RepositoryError;
use dashmap::DashMap;

use super::kv_store::KvStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    entries: Arc<DashMap<String, serde_json::Value>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = InMemoryKvStore::new();
        store.put("a", &json!({"x": 1})).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!({"x": 1})));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryKvStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = InMemoryKvStore::new();
        store.put("a", &json!(1)).await.unwrap();
        store.put("a", &json!(2)).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!(2)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = InMemoryKvStore::new();
        store.delete("nope").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_keys_filters_by_prefix_and_sorts() {
        let store = InMemoryKvStore::new();
        store.put("session:b", &json!([])).await.unwrap();
        store.put("session:a", &json!([])).await.unwrap();
        store.put("other", &json!([])).await.unwrap();

        let keys = store.list_keys("session:").await.unwrap();
        assert_eq!(keys, vec!["session:a", "session:b"]);
    }
}
