//! Cart error types.

use cart_kv::KvError;
use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Only [`Uninitialized`](CartError::Uninitialized),
/// [`StoreClosed`](CartError::StoreClosed) and
/// [`InvalidPrice`](CartError::InvalidPrice) are ever returned from the
/// public cart API. The remaining variants stay inside the store, where
/// they are logged and recovered from.
#[derive(Error, Debug)]
pub enum CartError {
    /// Cart API requested outside a provider scope.
    #[error("use_cart must be used within a CartProvider scope")]
    Uninitialized,

    /// The store task has stopped and no longer accepts commands.
    #[error("Cart store has shut down")]
    StoreClosed,

    /// Candidate item carries a negative or non-finite price.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Persisted value is not a valid cart snapshot.
    #[error("Corrupt cart snapshot: {0}")]
    CorruptSnapshot(String),

    /// The persistence adapter failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] KvError),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::CorruptSnapshot(e.to_string())
    }
}
