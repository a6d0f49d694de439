//! Key-value store error types.

use thiserror::Error;

/// Errors that can occur when talking to a key-value store.
#[derive(Error, Debug)]
pub enum KvError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Filesystem failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Key cannot be represented by this store.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

impl KvError {
    /// Whether retrying the same operation could plausibly succeed.
    ///
    /// Key and serialization failures are deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Store(_) | Self::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(KvError::Store("busy".into()).is_transient());
        assert!(KvError::Io(std::io::Error::other("disk")).is_transient());
        assert!(!KvError::InvalidKey("".into()).is_transient());

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(!KvError::from(json_err).is_transient());
    }

    #[test]
    fn test_display() {
        let err = KvError::InvalidKey("a/b".into());
        assert_eq!(err.to_string(), "Invalid key: \"a/b\"");
    }
}
