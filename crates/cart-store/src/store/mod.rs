//! Persistent cart store.
//!
//! [`CartStore::spawn`] starts a task that owns the cart, hydrates it from
//! storage and then applies commands sent through [`CartHandle`]s one at a
//! time. A second task writes a full snapshot after each change, so slow
//! storage never holds up the next command.

mod command;
mod handle;
mod task;
mod writer;

use std::sync::Arc;

use cart_kv::KvStore;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::cart::CartItem;
use crate::config::StoreConfig;
use crate::error::CartError;

pub use handle::CartHandle;

use command::Command;
use task::StoreTask;

/// Read-only view of the cart at one point in time.
pub type Snapshot = Arc<[CartItem]>;

/// A running cart store.
///
/// Dropping the store does not stop the task; it keeps running while any
/// [`CartHandle`] is alive. Use [`shutdown`](Self::shutdown) to stop it
/// explicitly.
#[derive(Debug)]
pub struct CartStore {
    handle: CartHandle,
    task: JoinHandle<()>,
}

impl CartStore {
    /// Spawn the store task on the current tokio runtime.
    ///
    /// The task reads the persisted snapshot before it processes any
    /// command, so commands sent immediately are applied on top of the
    /// restored cart.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<S>(storage: S, config: StoreConfig) -> Self
    where
        S: KvStore + 'static,
    {
        let storage: Arc<dyn KvStore> = Arc::new(storage);
        let capacity = config.channel_capacity.max(1);

        let (commands_tx, commands_rx) = mpsc::channel(capacity);
        let (state_tx, state_rx) = watch::channel::<Snapshot>(Arc::from(Vec::new()));
        let (hydrated_tx, hydrated_rx) = watch::channel(false);

        tracing::debug!(key = %config.storage_key, "starting cart store");
        let task = StoreTask::new(storage, config, state_tx, hydrated_tx);
        let task = tokio::spawn(task.run(commands_rx));

        Self {
            handle: CartHandle::new(commands_tx, state_rx, hydrated_rx),
            task,
        }
    }

    /// Spawn the store and wait for hydration to finish.
    pub async fn open<S>(storage: S, config: StoreConfig) -> Result<Self, CartError>
    where
        S: KvStore + 'static,
    {
        let store = Self::spawn(storage, config);
        store.handle.ready().await?;
        Ok(store)
    }

    /// Get a handle for issuing commands.
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Finish pending commands, then stop the task.
    ///
    /// Handles still alive afterwards get [`CartError::StoreClosed`].
    pub async fn shutdown(self) -> Result<(), CartError> {
        let sent = self.handle.request(Command::Shutdown).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "cart store task failed");
            return Err(CartError::StoreClosed);
        }
        sent
    }
}
