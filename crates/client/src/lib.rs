//! Asynchronous versioned store client.
//!
//! [`DataStore`] issues non-blocking store/restore operations against a
//! [`StoreBackend`](depot_core::StoreBackend). Results are delivered
//! through per-operation oneshot channels drained by a single worker task
//! per store, giving exactly-once resolution, per-key FIFO ordering, and a
//! configurable deadline after which a pending operation resolves with a
//! timeout error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod datastore;
mod op;

pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use datastore::{DataStore, Restored};
