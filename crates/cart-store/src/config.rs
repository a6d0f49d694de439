//! Store configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::retry::RetryPolicy;
use crate::snapshot::SnapshotFormat;

/// Key the cart snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketPlace:cart";

/// Default capacity of the command queue feeding the store task.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// What gets persisted after a decrement empties a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecrementPersistence {
    /// Persist the same list that becomes the in-memory state.
    #[default]
    Consistent,
    /// Persist the list before emptied lines are removed, so the stored
    /// snapshot keeps the line with `quantity: 0`. Matches what older
    /// clients wrote.
    Legacy,
}

/// Configuration for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the snapshot is read from and written to.
    pub storage_key: String,
    /// Capacity of the command queue.
    pub channel_capacity: usize,
    /// Persistence behaviour for decrements that empty a line.
    pub decrement_persistence: DecrementPersistence,
    /// Layout of written snapshots.
    pub snapshot_format: SnapshotFormat,
    /// Retry policy for failed writes.
    pub retry: RetryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            decrement_persistence: DecrementPersistence::default(),
            snapshot_format: SnapshotFormat::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        tracing::debug!(path = %path.display(), "loaded store config");
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(content).map_err(|e| CartError::Config(e.to_string()))?;
        config.validated()
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, CartError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| CartError::Config(e.to_string()))?;
        config.validated()
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the decrement persistence mode.
    pub fn with_decrement_persistence(mut self, mode: DecrementPersistence) -> Self {
        self.decrement_persistence = mode;
        self
    }

    /// Set the snapshot layout.
    pub fn with_snapshot_format(mut self, format: SnapshotFormat) -> Self {
        self.snapshot_format = format;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn validated(self) -> Result<Self, CartError> {
        if self.storage_key.is_empty() {
            return Err(CartError::Config("storage_key must not be empty".into()));
        }
        if self.channel_capacity == 0 {
            return Err(CartError::Config(
                "channel_capacity must be at least 1".into(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::BackoffStrategy;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "@GoMarketPlace:cart");
        assert_eq!(config.decrement_persistence, DecrementPersistence::Consistent);
        assert_eq!(config.snapshot_format, SnapshotFormat::Versioned);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = StoreConfig::from_toml_str(
            r#"
            storage_key = "@shop:cart"
            decrement_persistence = "legacy"
            snapshot_format = "array"

            [retry]
            max_attempts = 5
            backoff = { kind = "none" }
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_key, "@shop:cart");
        assert_eq!(config.decrement_persistence, DecrementPersistence::Legacy);
        assert_eq!(config.snapshot_format, SnapshotFormat::Array);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.backoff, BackoffStrategy::None);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_json_config() {
        let config =
            StoreConfig::from_json_str(r#"{"storage_key":"k","channel_capacity":8}"#).unwrap();
        assert_eq!(config.storage_key, "k");
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            StoreConfig::from_toml_str(r#"storage_key = """#),
            Err(CartError::Config(_))
        ));
        assert!(StoreConfig::from_toml_str("channel_capacity = 0").is_err());
        assert!(StoreConfig::from_toml_str("decrement_persistence = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "storage_key = \"from-toml\"").unwrap();
        assert_eq!(StoreConfig::load(&toml_path).unwrap().storage_key, "from-toml");

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"storage_key":"from-json"}"#).unwrap();
        assert_eq!(StoreConfig::load(&json_path).unwrap().storage_key, "from-json");

        assert!(StoreConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
