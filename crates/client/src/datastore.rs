//! The versioned store client handle.
//!
//! `DataStore` issues asynchronous store/restore operations against one
//! named store instance. Calls return immediately in the async sense — the
//! caller holds a future resolved by the store worker on a later turn, and
//! every accepted operation resolves exactly once: with its result, or with
//! a timeout once the configured deadline elapses.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use depot_core::backend::{StoreBackend, StoreEntry};
use depot_core::codec::{self, TypeTag};
use depot_core::error::{Error, Result};
use depot_core::value::Value;

use crate::config::ClientConfig;
use crate::op::{spawn_worker, Operation};

/// A restored entry re-typed against a caller-supplied tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The decoded value.
    pub value: Value,
    /// Canonical JSON form of `value`.
    pub json: String,
    /// Version of the entry that was decoded.
    pub version: u64,
}

struct Inner {
    id: String,
    // None once released; operations then resolve BackendUnavailable.
    tx: Mutex<Option<mpsc::UnboundedSender<Operation>>>,
    config: ClientConfig,
}

/// Handle to an open store instance.
///
/// Cloning is cheap and clones share the released state: releasing any
/// clone releases the handle for all of them. The registry keeps the
/// underlying instance alive independently, so a released handle can be
/// reopened under the same identity.
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<Inner>,
}

impl DataStore {
    /// Open a client over `backend` under the display identity `id`.
    ///
    /// Spawns the store worker; must be called within a tokio runtime.
    pub fn open(
        id: impl Into<String>,
        backend: Arc<dyn StoreBackend>,
        config: ClientConfig,
    ) -> Self {
        let id = id.into();
        let tx = spawn_worker(id.clone(), backend);
        DataStore {
            inner: Arc::new(Inner {
                id,
                tx: Mutex::new(Some(tx)),
                config,
            }),
        }
    }

    /// Identity this handle was opened under.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Release the handle.
    ///
    /// Idempotent. The worker drains already-queued operations, then
    /// stops; operations issued after release resolve with
    /// `BackendUnavailable` rather than panicking.
    pub fn release(&self) {
        if self.inner.tx.lock().take().is_some() {
            tracing::debug!(store = %self.inner.id, "released handle");
        }
    }

    /// True once [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.inner.tx.lock().is_none()
    }

    /// Create or overwrite the entry for `key`.
    ///
    /// Returns the new version: 1 on the first store of a key, then
    /// incrementing by exactly 1 per successful write. Concurrent stores
    /// through one handle are applied in issue order.
    pub async fn store(&self, key: &str, value: &Value) -> Result<u64> {
        let json = codec::encode(value);
        self.store_json(key, json).await
    }

    /// Create or overwrite the entry for `key` with an already-encoded
    /// JSON payload.
    pub async fn store_json(&self, key: &str, json: String) -> Result<u64> {
        let (reply, rx) = oneshot::channel();
        self.submit(Operation::Store {
            key: key.to_string(),
            json,
            reply,
        })?;
        self.resolve(key, rx).await
    }

    /// Fetch the current entry for `key`, type-erased.
    ///
    /// Returns the raw JSON form and its version; never fails on type
    /// grounds. A key that has never been stored resolves `KeyNotFound`.
    pub async fn restore(&self, key: &str) -> Result<StoreEntry> {
        let (reply, rx) = oneshot::channel();
        self.submit(Operation::Restore {
            key: key.to_string(),
            reply,
        })?;
        self.resolve(key, rx).await
    }

    /// Fetch the entry for `key` and decode it against `tag`.
    ///
    /// Resolves `TypeMismatch` when the stored payload cannot be
    /// interpreted as the tagged type.
    pub async fn restore_typed(&self, key: &str, tag: TypeTag) -> Result<Restored> {
        let entry = self.restore(key).await?;

        let parsed: serde_json::Value =
            serde_json::from_str(&entry.json).map_err(|e| Error::TypeMismatch {
                key: key.to_string(),
                tag: tag.token().to_string(),
                reason: format!("stored payload is not valid JSON: {}", e),
            })?;

        let value = codec::value_from_json(tag, &parsed).map_err(|reason| Error::TypeMismatch {
            key: key.to_string(),
            tag: tag.token().to_string(),
            reason,
        })?;

        let json = codec::encode(&value);
        Ok(Restored {
            value,
            json,
            version: entry.version,
        })
    }

    fn submit(&self, op: Operation) -> Result<()> {
        let tx = self.inner.tx.lock();
        let Some(tx) = tx.as_ref() else {
            return Err(Error::unavailable(format!(
                "store {} handle was released",
                self.inner.id
            )));
        };
        tx.send(op)
            .map_err(|_| Error::unavailable(format!("store {} worker stopped", self.inner.id)))
    }

    /// Await one oneshot result under the configured deadline.
    ///
    /// Dropping the receiver on timeout is what guards against duplicate
    /// resolution: a late backend response lands on a closed channel.
    async fn resolve<T>(&self, key: &str, rx: oneshot::Receiver<Result<T>>) -> Result<T> {
        let deadline = self.inner.config.timeout;
        match tokio::time::timeout(deadline, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::unavailable(format!(
                "store {} worker dropped the operation",
                self.inner.id
            ))),
            Err(_) => Err(Error::Timeout {
                key: key.to_string(),
                ms: deadline.as_millis() as u64,
            }),
        }
    }
}
