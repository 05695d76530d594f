//! Key-value store trait.
//!
//! Defines the interface for the durable key-value primitive.
//! Implementations live in chatrelay-infra (SQLite) and [`super::memory`].

use chatrelay_types::error::RepositoryError;

/// Trait for key-value persistent storage.
///
/// Stores arbitrary JSON values keyed by string. Each key is independent;
/// implementations need no cross-key transactions.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn put(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all keys starting with `prefix`, sorted ascending.
    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}
