//! Cloneable front end to a running cart store.

use tokio::sync::{mpsc, oneshot, watch};

use crate::cart::NewCartItem;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::store::command::{Command, Envelope};
use crate::store::Snapshot;

/// Handle to a running [`CartStore`](crate::CartStore).
///
/// Handles are cheap to clone and may be used from any task. Every
/// mutation resolves once the change is visible through
/// [`products`](Self::products); persistence happens afterwards in the
/// background.
#[derive(Debug, Clone)]
pub struct CartHandle {
    commands: mpsc::Sender<Envelope>,
    state: watch::Receiver<Snapshot>,
    hydrated: watch::Receiver<bool>,
}

impl CartHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Envelope>,
        state: watch::Receiver<Snapshot>,
        hydrated: watch::Receiver<bool>,
    ) -> Self {
        Self {
            commands,
            state,
            hydrated,
        }
    }

    /// Current cart contents, in insertion order.
    pub fn products(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Receive every new snapshot as it is published.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.clone()
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    ///
    /// Rejects a candidate with a negative or non-finite price before it
    /// reaches the store.
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<(), CartError> {
        item.validate()?;
        self.request(Command::Add(item)).await
    }

    /// Bump the quantity of a product. Unknown ids are ignored.
    pub async fn increment(&self, id: impl Into<ProductId>) -> Result<(), CartError> {
        self.request(Command::Increment(id.into())).await
    }

    /// Lower the quantity of a product, removing it at zero. Unknown ids
    /// are ignored.
    pub async fn decrement(&self, id: impl Into<ProductId>) -> Result<(), CartError> {
        self.request(Command::Decrement(id.into())).await
    }

    /// Remove every item and the persisted snapshot.
    pub async fn clear(&self) -> Result<(), CartError> {
        self.request(Command::Clear).await
    }

    /// Wait until every command sent before this call has been applied and
    /// its write attempted. Also waits for hydration.
    pub async fn flush(&self) -> Result<(), CartError> {
        self.request(Command::Flush).await
    }

    /// Wait until the persisted cart has been loaded.
    pub async fn ready(&self) -> Result<(), CartError> {
        let mut hydrated = self.hydrated.clone();
        let result = hydrated.wait_for(|done| *done).await.map(|_| ());
        result.map_err(|_| CartError::StoreClosed)
    }

    /// Whether the store has stopped accepting commands.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub(crate) async fn request(&self, command: Command) -> Result<(), CartError> {
        let (ack, done) = oneshot::channel();
        self.commands
            .send(Envelope { command, ack })
            .await
            .map_err(|_| CartError::StoreClosed)?;
        done.await.map_err(|_| CartError::StoreClosed)
    }
}
