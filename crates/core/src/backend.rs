//! Backend abstraction for the store client.
//!
//! This module defines the client-side contract a backing engine must
//! satisfy. The reference implementation is the in-memory backend in
//! `depot-store`; an embedded, networked, or file-based engine can be
//! swapped in without breaking the client.

use crate::error::Result;

/// One record held by the backend per key.
///
/// ## Invariants
///
/// - `version` is monotonically non-decreasing per key and never reused
/// - `json` is the exact payload of the write that created this version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Serialized payload, JSON text.
    pub json: String,
    /// Version assigned by the write that produced this entry.
    pub version: u64,
}

impl StoreEntry {
    /// Create an entry.
    pub fn new(json: impl Into<String>, version: u64) -> Self {
        StoreEntry {
            json: json.into(),
            version,
        }
    }
}

/// Storage abstraction the client issues operations against.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires `Send + Sync`). The client serializes
/// operations per store, so implementations only need per-call atomicity:
/// a successful `store` must assign exactly one new version to the key,
/// with no gaps or duplicates in the sequence observed by one client.
pub trait StoreBackend: Send + Sync {
    /// Create or overwrite the entry for `key`.
    ///
    /// Returns the new version. Versions per key start at 1 and increment
    /// by exactly 1 on every successful write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`](crate::Error::BackendUnavailable)
    /// if the backend cannot accept writes.
    fn store(&self, key: &str, json: &str) -> Result<u64>;

    /// Fetch the current entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the key
    /// has never been stored, or
    /// [`Error::BackendUnavailable`](crate::Error::BackendUnavailable) if
    /// the backend cannot be reached.
    fn restore(&self, key: &str) -> Result<StoreEntry>;
}
