//! Persisted cart snapshot format.
//!
//! New snapshots are written as a versioned envelope:
//!
//! ```json
//! {"version":1,"saved_at":"2026-01-01T00:00:00Z","items":[...]}
//! ```
//!
//! Hydration also accepts a bare JSON array of items, which is what older
//! clients wrote under the same key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::error::CartError;

/// Version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout selected for writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    /// Versioned envelope.
    #[default]
    Versioned,
    /// Bare array of items, readable by legacy clients.
    Array,
}

/// Versioned cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Schema version.
    pub version: u32,
    /// When the snapshot was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Full list of items at the time of writing.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Snapshot `items` at the current version, stamped now.
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Some(Utc::now()),
            items,
        }
    }
}

/// Any layout that may be found under the cart key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoredSnapshot {
    /// Versioned envelope.
    Versioned(CartSnapshot),
    /// Bare array of items.
    Legacy(Vec<CartItem>),
}

impl StoredSnapshot {
    /// Build the value to write for `items` in the given layout.
    pub fn for_write(items: Vec<CartItem>, format: SnapshotFormat) -> Self {
        match format {
            SnapshotFormat::Versioned => Self::Versioned(CartSnapshot::new(items)),
            SnapshotFormat::Array => Self::Legacy(items),
        }
    }

    /// Validate and convert into a cart.
    ///
    /// Items with quantity 0 are dropped: older clients persisted the list
    /// before removing emptied lines. Every other invariant violation makes
    /// the whole snapshot corrupt.
    pub fn into_cart(self) -> Result<Cart, CartError> {
        let items = match self {
            Self::Versioned(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.items,
            Self::Versioned(snapshot) => {
                return Err(CartError::CorruptSnapshot(format!(
                    "unsupported snapshot version {}",
                    snapshot.version
                )))
            }
            Self::Legacy(items) => items,
        };

        let items = items.into_iter().filter(|i| i.quantity > 0).collect();
        Cart::restore(items)
    }
}

/// Decode a raw persisted value into a cart.
pub fn decode(raw: &str) -> Result<Cart, CartError> {
    let stored: StoredSnapshot = serde_json::from_str(raw)?;
    stored.into_cart()
}
