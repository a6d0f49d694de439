//! Key-value store trait and typed JSON wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::KvError;

/// Result type for key-value operations.
pub type KvResult<T> = Result<T, KvError>;

/// Asynchronous string key-value store.
///
/// This is the only view the cart has of durable storage: opaque string
/// keys mapped to opaque string values.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> KvResult<()>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key).await
    }
}

/// Type-safe wrapper over a [`KvStore`] with automatic JSON serialization.
///
/// # Example
///
/// ```rust,ignore
/// let store = JsonStore::new(MemoryStore::new());
/// store.put("cart:user123", &cart).await?;
/// let cart: Option<Cart> = store.fetch("cart:user123").await?;
/// ```
#[derive(Clone)]
pub struct JsonStore<S> {
    inner: S,
}

impl<S: KvStore> JsonStore<S> {
    /// Wrap a raw string store.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get and decode a value. Returns `None` if the key doesn't exist.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &str) -> KvResult<Option<T>> {
        match self.inner.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store a value.
    pub async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> KvResult<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key, &raw).await
    }

    /// Delete a value.
    pub async fn delete(&self, key: &str) -> KvResult<()> {
        self.inner.remove(key).await
    }

    /// Borrow the underlying string store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("@GoMarketPlace", "cart");
/// // Returns "@GoMarketPlace:cart"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key!("@GoMarketPlace", "cart"), "@GoMarketPlace:cart");
        assert_eq!(cache_key!("shop", "cart", 42), "shop:cart:42");
    }

    #[tokio::test]
    async fn test_json_store_put_fetch() {
        let store = JsonStore::new(MemoryStore::new());
        let lines = vec![Line {
            id: "A".into(),
            quantity: 2,
        }];

        store.put("cart", &lines).await.unwrap();
        let back: Option<Vec<Line>> = store.fetch("cart").await.unwrap();
        assert_eq!(back, Some(lines));
    }

    #[tokio::test]
    async fn test_json_store_missing_key() {
        let store = JsonStore::new(MemoryStore::new());
        let back: Option<Vec<Line>> = store.fetch("nothing").await.unwrap();
        assert!(back.is_none());
    }

    #[tokio::test]
    async fn test_json_store_decode_error() {
        let raw = MemoryStore::new();
        raw.set("cart", "{not json").await.unwrap();
        let store = JsonStore::new(raw);

        let result: KvResult<Option<Vec<Line>>> = store.fetch("cart").await;
        assert!(matches!(result, Err(KvError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_arc_store_delegates() {
        let shared: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        shared.set("k", "v").await.unwrap();

        let clone = Arc::clone(&shared);
        assert_eq!(clone.get("k").await.unwrap().as_deref(), Some("v"));
        clone.remove("k").await.unwrap();
        assert!(shared.get("k").await.unwrap().is_none());
    }
}
