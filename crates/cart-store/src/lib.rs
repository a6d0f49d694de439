//! Shopping cart state with serialized mutations and write-through
//! persistence.
//!
//! This crate provides:
//!
//! - **Cart**: line items and the add / increment / decrement transitions
//! - **Store**: a task that owns the cart, restores it at startup and
//!   persists a full snapshot after every change
//! - **Context**: scoped access to a running store via [`use_cart`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_store::prelude::*;
//! use cart_kv::MemoryStore;
//!
//! let store = CartStore::open(MemoryStore::new(), StoreConfig::default()).await?;
//! let cart = store.handle();
//!
//! cart.add_to_cart(NewCartItem::new("A", "Shirt", "https://img/a.png", 10.0)).await?;
//! cart.increment("A").await?;
//! cart.decrement("A").await?;
//!
//! for item in cart.products().iter() {
//!     println!("{} x{}", item.title, item.quantity);
//! }
//! ```

pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod retry;
pub mod snapshot;
pub mod store;

pub use cart::{Cart, CartItem, Decrement, NewCartItem};
pub use config::{DecrementPersistence, StoreConfig, DEFAULT_STORAGE_KEY};
pub use context::{use_cart, CartProvider};
pub use error::CartError;
pub use ids::ProductId;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use snapshot::{CartSnapshot, SnapshotFormat, StoredSnapshot, SNAPSHOT_VERSION};
pub use store::{CartHandle, CartStore, Snapshot};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem, NewCartItem};
    pub use crate::config::{DecrementPersistence, StoreConfig};
    pub use crate::context::{use_cart, CartProvider};
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::store::{CartHandle, CartStore, Snapshot};
}
