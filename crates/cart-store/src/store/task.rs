//! The single task that owns the cart.
//!
//! Commands arrive one at a time over the queue and each is applied to the
//! state left by the previous one, so no mutation can be computed from a
//! stale copy. The snapshot is published to readers, then handed to the
//! writer task; writes reach storage in command order.

use std::sync::Arc;

use cart_kv::{JsonStore, KvError, KvStore};
use tokio::sync::{mpsc, oneshot, watch};

use crate::cart::{Cart, CartItem, Decrement};
use crate::config::{DecrementPersistence, StoreConfig};
use crate::snapshot::StoredSnapshot;
use crate::store::command::{Command, Envelope};
use crate::store::writer::Writer;
use crate::store::Snapshot;

pub(crate) struct StoreTask {
    cart: Cart,
    storage: JsonStore<Arc<dyn KvStore>>,
    writer: Writer,
    config: StoreConfig,
    state: watch::Sender<Snapshot>,
    hydrated: watch::Sender<bool>,
}

impl StoreTask {
    pub(crate) fn new(
        storage: Arc<dyn KvStore>,
        config: StoreConfig,
        state: watch::Sender<Snapshot>,
        hydrated: watch::Sender<bool>,
    ) -> Self {
        let writer = Writer::spawn(
            Arc::clone(&storage),
            config.storage_key.clone(),
            config.retry.clone(),
        );
        Self {
            cart: Cart::new(),
            storage: JsonStore::new(storage),
            writer,
            config,
            state,
            hydrated,
        }
    }

    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<Envelope>) {
        self.hydrate().await;

        while let Some(Envelope { command, ack }) = commands.recv().await {
            tracing::trace!(command = command.name(), "applying cart command");
            match command {
                Command::Add(candidate) => {
                    let id = candidate.id.clone();
                    let appended = self.cart.add(candidate);
                    tracing::debug!(%id, appended, "added to cart");
                    self.commit(ack);
                    self.persist(self.cart.items().to_vec());
                }
                Command::Increment(id) => {
                    if self.cart.increment(&id) {
                        tracing::debug!(%id, "incremented");
                        self.commit(ack);
                        self.persist(self.cart.items().to_vec());
                    } else {
                        tracing::debug!(%id, "increment ignored, item not in cart");
                        let _ = ack.send(());
                    }
                }
                Command::Decrement(id) => match self.cart.decrement(&id) {
                    Decrement::NotFound => {
                        tracing::debug!(%id, "decrement ignored, item not in cart");
                        let _ = ack.send(());
                    }
                    Decrement::Decremented => {
                        tracing::debug!(%id, "decremented");
                        self.commit(ack);
                        self.persist(self.cart.items().to_vec());
                    }
                    Decrement::Removed { index, item } => {
                        tracing::debug!(%id, "decremented to zero, removed");
                        self.commit(ack);
                        let mut persisted = self.cart.items().to_vec();
                        if self.config.decrement_persistence == DecrementPersistence::Legacy {
                            persisted.insert(index.min(persisted.len()), item);
                        }
                        self.persist(persisted);
                    }
                },
                Command::Clear => {
                    self.cart.clear();
                    tracing::debug!("cleared cart");
                    self.commit(ack);
                    self.writer.erase();
                }
                Command::Flush => self.writer.flush(ack),
                Command::Shutdown => {
                    let _ = ack.send(());
                    break;
                }
            }
        }

        self.writer.close().await;
        tracing::debug!("cart store stopped");
    }

    /// Load the persisted snapshot. Any failure leaves the cart empty.
    async fn hydrate(&mut self) {
        let key = self.config.storage_key.as_str();
        let storage = &self.storage;
        let loaded = self
            .config
            .retry
            .run("hydrate", || storage.fetch::<StoredSnapshot>(key))
            .await;

        match loaded {
            Ok(Some(stored)) => match stored.into_cart() {
                Ok(cart) => {
                    tracing::info!(key, items = cart.len(), "restored cart");
                    self.cart = cart;
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding corrupt cart snapshot");
                }
            },
            Ok(None) => {
                tracing::debug!(key, "no persisted cart, starting empty");
            }
            Err(KvError::Serialization(e)) => {
                tracing::warn!(key, error = %e, "discarding unreadable cart snapshot");
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted cart, starting empty");
            }
        }

        self.publish();
        self.hydrated.send_replace(true);
    }

    /// Publish the current cart to readers and release the caller.
    fn commit(&self, ack: oneshot::Sender<()>) {
        self.publish();
        // The caller may have stopped waiting; the mutation stands either way.
        let _ = ack.send(());
    }

    fn publish(&self) {
        self.state.send_replace(Arc::from(self.cart.items()));
    }

    /// Queue a full snapshot for the writer.
    fn persist(&self, items: Vec<CartItem>) {
        let stored = StoredSnapshot::for_write(items, self.config.snapshot_format);
        self.writer.put(stored);
    }
}
