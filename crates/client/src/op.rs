//! Pending operations and the per-store worker.
//!
//! Each accepted call becomes one [`Operation`] carrying a oneshot result
//! sink. A single worker task per open store drains the operation queue in
//! issue order, which gives the ordering contract for free: writes from one
//! client are applied in the order issued, and two in-flight stores on the
//! same key cannot produce an out-of-order version assignment.
//!
//! Exactly-once resolution: the oneshot sender is consumed by the send, so
//! an operation cannot resolve twice. If the caller has already given up
//! (deadline elapsed, receiver dropped) the late result is discarded here
//! and logged at debug.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use depot_core::backend::{StoreBackend, StoreEntry};
use depot_core::error::Result;

/// A pending asynchronous request against one store.
#[derive(Debug)]
pub(crate) enum Operation {
    /// Create or overwrite an entry; resolves with the new version.
    Store {
        key: String,
        json: String,
        reply: oneshot::Sender<Result<u64>>,
    },
    /// Fetch the current entry for a key.
    Restore {
        key: String,
        reply: oneshot::Sender<Result<StoreEntry>>,
    },
}

impl Operation {
    fn key(&self) -> &str {
        match self {
            Operation::Store { key, .. } | Operation::Restore { key, .. } => key,
        }
    }
}

/// Spawn the worker task owning the backend reference for one store.
///
/// The worker runs until every sender for the returned channel is dropped
/// (handle released or all clones gone), then exits. Must be called from
/// within a tokio runtime.
pub(crate) fn spawn_worker(
    store_id: String,
    backend: Arc<dyn StoreBackend>,
) -> mpsc::UnboundedSender<Operation> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Operation>();

    tokio::spawn(async move {
        while let Some(op) = rx.recv().await {
            let key = op.key().to_string();
            match op {
                Operation::Store { key, json, reply } => {
                    let result = backend.store(&key, &json);
                    if reply.send(result).is_err() {
                        tracing::debug!(store = %store_id, key, "discarding late store result");
                    }
                }
                Operation::Restore { reply, .. } => {
                    let result = backend.restore(&key);
                    if reply.send(result).is_err() {
                        tracing::debug!(store = %store_id, key, "discarding late restore result");
                    }
                }
            }
        }
        tracing::debug!(store = %store_id, "store worker stopped");
    });

    tx
}
