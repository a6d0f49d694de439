//! Background task that writes snapshots to storage.
//!
//! The store task hands over every change and moves on; slow or failing
//! storage only delays the writer. Jobs are handled in the order they were
//! queued, and a backlog of writes collapses into the newest one since each
//! carries the whole cart.

use std::sync::Arc;

use cart_kv::{JsonStore, KvStore};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::retry::RetryPolicy;
use crate::snapshot::StoredSnapshot;

#[derive(Debug)]
pub(crate) enum Job {
    Put(StoredSnapshot),
    Erase,
    /// Acknowledged once every write queued before it has been attempted.
    Flush(oneshot::Sender<()>),
}

/// Sending side of the writer, owned by the store task.
pub(crate) struct Writer {
    jobs: mpsc::UnboundedSender<Job>,
    task: JoinHandle<()>,
}

impl Writer {
    pub(crate) fn spawn(storage: Arc<dyn KvStore>, key: String, retry: RetryPolicy) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        let task = WriterTask {
            storage: JsonStore::new(storage),
            key,
            retry,
        };
        Self {
            jobs,
            task: tokio::spawn(task.run(rx)),
        }
    }

    pub(crate) fn put(&self, snapshot: StoredSnapshot) {
        self.send(Job::Put(snapshot));
    }

    pub(crate) fn erase(&self) {
        self.send(Job::Erase);
    }

    pub(crate) fn flush(&self, ack: oneshot::Sender<()>) {
        self.send(Job::Flush(ack));
    }

    fn send(&self, job: Job) {
        if let Err(mpsc::error::SendError(job)) = self.jobs.send(job) {
            tracing::error!("cart writer stopped, dropping write");
            if let Job::Flush(ack) = job {
                let _ = ack.send(());
            }
        }
    }

    /// Finish queued writes, then stop.
    pub(crate) async fn close(self) {
        drop(self.jobs);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "cart writer failed");
        }
    }
}

struct WriterTask {
    storage: JsonStore<Arc<dyn KvStore>>,
    key: String,
    retry: RetryPolicy,
}

impl WriterTask {
    async fn run(self, mut jobs: mpsc::UnboundedReceiver<Job>) {
        while let Some(first) = jobs.recv().await {
            let mut latest = None;
            let mut waiters = Vec::new();
            let mut next = Some(first);

            while let Some(job) = next {
                match job {
                    Job::Flush(ack) => waiters.push(ack),
                    write => {
                        if latest.is_some() {
                            tracing::trace!("superseded queued cart write");
                        }
                        latest = Some(write);
                    }
                }
                next = jobs.try_recv().ok();
            }

            match latest {
                Some(Job::Put(snapshot)) => self.persist(&snapshot).await,
                Some(Job::Erase) => self.erase().await,
                Some(Job::Flush(_)) | None => {}
            }

            for ack in waiters {
                let _ = ack.send(());
            }
        }

        tracing::debug!("cart writer stopped");
    }

    /// Write a full snapshot. Failures are logged, never propagated.
    async fn persist(&self, snapshot: &StoredSnapshot) {
        let key = self.key.as_str();
        let storage = &self.storage;

        let result = self
            .retry
            .run("persist", || storage.put(key, snapshot))
            .await;

        if let Err(e) = result {
            tracing::error!(key, error = %e, "failed to persist cart snapshot");
        }
    }

    async fn erase(&self) {
        let key = self.key.as_str();
        let storage = &self.storage;

        let result = self.retry.run("erase", || storage.delete(key)).await;

        if let Err(e) = result {
            tracing::error!(key, error = %e, "failed to remove cart snapshot");
        }
    }
}
