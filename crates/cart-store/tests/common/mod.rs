//! Test adapters wrapping an in-memory store.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cart_kv::{KvError, KvResult, KvStore, MemoryStore};
use cart_store::{CartItem, NewCartItem, StoredSnapshot};

pub const KEY: &str = "@GoMarketPlace:cart";

pub fn shirt() -> NewCartItem {
    NewCartItem::new("A", "Shirt", "https://img/a.png", 10.0)
}

pub fn mug() -> NewCartItem {
    NewCartItem::new("B", "Mug", "https://img/b.png", 4.5)
}

pub fn lines(items: &[CartItem]) -> Vec<(String, u32)> {
    items
        .iter()
        .map(|i| (i.id.to_string(), i.quantity))
        .collect()
}

/// Decode whatever is stored under [`KEY`], keeping zero-quantity lines.
pub async fn persisted_lines(store: &MemoryStore) -> Option<Vec<(String, u32)>> {
    let raw = store.get(KEY).await.unwrap()?;
    let items = match serde_json::from_str::<StoredSnapshot>(&raw).unwrap() {
        StoredSnapshot::Versioned(snapshot) => snapshot.items,
        StoredSnapshot::Legacy(items) => items,
    };
    Some(lines(&items))
}

/// Fails the first `failures` writes, then delegates.
pub struct FlakyStore {
    pub inner: Arc<MemoryStore>,
    failures: u32,
    pub writes: AtomicU32,
}

impl FlakyStore {
    pub fn new(inner: Arc<MemoryStore>, failures: u32) -> Self {
        Self {
            inner,
            failures,
            writes: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let n = self.writes.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(KvError::Store(format!("write {n} rejected")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        self.inner.remove(key).await
    }
}

/// Every operation fails.
pub struct BrokenStore;

#[async_trait]
impl KvStore for BrokenStore {
    async fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::Store("unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Store("unavailable".into()))
    }

    async fn remove(&self, _key: &str) -> KvResult<()> {
        Err(KvError::Store("unavailable".into()))
    }
}

/// Delays reads so commands can queue up behind hydration.
pub struct SlowReadStore {
    pub inner: Arc<MemoryStore>,
    pub delay: Duration,
}

#[async_trait]
impl KvStore for SlowReadStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        self.inner.remove(key).await
    }
}

/// Delays writes, optionally failing them afterwards.
pub struct SlowWriteStore {
    pub inner: Arc<MemoryStore>,
    pub delay: Duration,
    pub fail: bool,
}

#[async_trait]
impl KvStore for SlowWriteStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(KvError::Store("write timed out".into()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        self.inner.remove(key).await
    }
}
