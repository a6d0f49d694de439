//! Ambient access to the cart for code running inside a provider scope.
//!
//! A [`CartProvider`] makes a [`CartHandle`] available to everything it
//! runs, without threading the handle through every call. [`use_cart`]
//! fails immediately outside such a scope.
//!
//! ```rust,ignore
//! let store = CartStore::open(MemoryStore::new(), StoreConfig::default()).await?;
//! let provider = CartProvider::new(store.handle());
//!
//! provider
//!     .scope(async {
//!         let cart = use_cart()?;
//!         cart.add_to_cart(item).await
//!     })
//!     .await?;
//! ```

use std::future::Future;

use crate::error::CartError;
use crate::store::CartHandle;

tokio::task_local! {
    static CURRENT_CART: CartHandle;
}

/// Scopes a cart handle over the code it runs.
#[derive(Debug, Clone)]
pub struct CartProvider {
    handle: CartHandle,
}

impl CartProvider {
    /// Provide `handle` to scoped code.
    pub fn new(handle: CartHandle) -> Self {
        Self { handle }
    }

    /// Run `future` with the cart available through [`use_cart`].
    pub async fn scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(self.handle.clone(), future).await
    }

    /// Run a synchronous closure with the cart available.
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT_CART.sync_scope(self.handle.clone(), f)
    }
}

/// Get the cart provided to the current scope.
///
/// Returns [`CartError::Uninitialized`] when called outside
/// [`CartProvider::scope`] or [`CartProvider::sync_scope`].
pub fn use_cart() -> Result<CartHandle, CartError> {
    CURRENT_CART
        .try_with(CartHandle::clone)
        .map_err(|_| CartError::Uninitialized)
}
