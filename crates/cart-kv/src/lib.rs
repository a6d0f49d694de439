//! Asynchronous string key-value persistence for the cart store.
//!
//! Provides the [`KvStore`] trait the cart persists through, plus two
//! implementations: [`MemoryStore`] for tests and embedding, and
//! [`FileStore`] for durable storage on local disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_kv::{FileStore, KvStore};
//!
//! let store = FileStore::open("./.cart").await?;
//!
//! // Store a value
//! store.set("@GoMarketPlace:cart", "[]").await?;
//!
//! // Retrieve a value
//! let raw: Option<String> = store.get("@GoMarketPlace:cart").await?;
//!
//! // Delete a value
//! store.remove("@GoMarketPlace:cart").await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::KvError;
pub use file::FileStore;
pub use kv::{JsonStore, KvResult, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, JsonStore, KvError, KvResult, KvStore, MemoryStore};
}
