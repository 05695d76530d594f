//! BoxKvStore -- object-safe dynamic dispatch wrapper for KvStore.
//!
//! 1. Define an object-safe `KvStoreDyn` trait with boxed futures
//! 2. Blanket-impl `KvStoreDyn` for all `T: KvStore`
//! 3. `BoxKvStore` wraps `Box<dyn KvStoreDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::error::RepositoryError;

use super::kv_store::KvStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Object-safe version of [`KvStore`] with boxed futures.
pub trait KvStoreDyn: Send + Sync {
    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<serde_json::Value>>;

    fn put_boxed<'a>(&'a self, key: &'a str, value: &'a serde_json::Value) -> BoxFuture<'a, ()>;

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, ()>;

    fn list_keys_boxed<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Vec<String>>;
}

impl<T: KvStore> KvStoreDyn for T {
    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<serde_json::Value>> {
        Box::pin(self.get(key))
    }

    fn put_boxed<'a>(&'a self, key: &'a str, value: &'a serde_json::Value) -> BoxFuture<'a, ()> {
        Box::pin(self.put(key, value))
    }

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(self.delete(key))
    }

    fn list_keys_boxed<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Vec<String>> {
        Box::pin(self.list_keys(prefix))
    }
}

/// Type-erased KV store for runtime backend selection (SQLite vs in-memory).
///
/// Since `KvStore` uses RPITIT it cannot be a trait object directly;
/// `BoxKvStore` implements `KvStore` itself by delegating to the inner
/// `KvStoreDyn` trait object, so it can be plugged into any generic consumer.
pub struct BoxKvStore {
    inner: Box<dyn KvStoreDyn + Send + Sync>,
}

impl BoxKvStore {
    /// Wrap a concrete `KvStore` implementation.
    pub fn new<T: KvStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }
}

impl KvStore for BoxKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        self.inner.get_boxed(key).await
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.inner.put_boxed(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.inner.delete_boxed(key).await
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, RepositoryError> {
        self.inner.list_keys_boxed(prefix).await
    }
}
