//! In-memory reference backend.
//!
//! ## Design
//!
//! `MemoryBackend` is the reference implementation of
//! [`StoreBackend`]: a `RwLock`'d map of key → current entry with a
//! per-key version counter. It exists so the client, the dispatcher, and
//! the test suites have a complete engine to run against; durability is
//! explicitly out of scope.
//!
//! ## Thread Safety
//!
//! `MemoryBackend` is `Send + Sync`. Writes take the lock for the whole
//! read-increment-insert step, so a successful `store` assigns exactly one
//! new version with no gaps or duplicates.

use std::collections::HashMap;

use parking_lot::RwLock;

use depot_core::backend::{StoreBackend, StoreEntry};
use depot_core::error::{Error, Result};

/// In-memory versioned key-value backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if no key has ever been stored (or all were overwritten away).
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoreBackend for MemoryBackend {
    fn store(&self, key: &str, json: &str) -> Result<u64> {
        let mut entries = self.entries.write();
        // First write of a key is version 1.
        let version = entries.get(key).map_or(1, |e| e.version + 1);
        entries.insert(key.to_string(), StoreEntry::new(json, version));
        tracing::trace!(key, version, "stored entry");
        Ok(version)
    }

    fn restore(&self, key: &str) -> Result<StoreEntry> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_store_is_version_one() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.store("myIntKey", "31337").unwrap(), 1);
    }

    #[test]
    fn overwrite_increments_by_exactly_one() {
        let backend = MemoryBackend::new();
        let v1 = backend.store("k", "\"a\"").unwrap();
        let v2 = backend.store("k", "\"b\"").unwrap();
        let v3 = backend.store("k", "\"c\"").unwrap();
        assert_eq!((v1, v2, v3), (1, 2, 3));

        // Latest write wins
        let entry = backend.restore("k").unwrap();
        assert_eq!(entry.json, "\"c\"");
        assert_eq!(entry.version, 3);
    }

    #[test]
    fn keys_version_independently() {
        let backend = MemoryBackend::new();
        backend.store("a", "1").unwrap();
        backend.store("a", "2").unwrap();
        assert_eq!(backend.store("b", "1").unwrap(), 1);
    }

    #[test]
    fn restore_missing_key_fails() {
        let backend = MemoryBackend::new();
        let err = backend.restore("neverWrittenKey").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { key } if key == "neverWrittenKey"));
    }

    #[test]
    fn len_counts_distinct_keys() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        backend.store("a", "1").unwrap();
        backend.store("a", "2").unwrap();
        backend.store("b", "1").unwrap();
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn concurrent_writers_never_duplicate_versions() {
        use std::sync::Arc;

        let backend = Arc::new(MemoryBackend::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let backend = Arc::clone(&backend);
            handles.push(std::thread::spawn(move || {
                let mut seen = Vec::new();
                for _ in 0..100 {
                    seen.push(backend.store("contended", "0").unwrap());
                }
                seen
            }));
        }

        let mut versions: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        versions.sort_unstable();
        let expected: Vec<u64> = (1..=800).collect();
        assert_eq!(versions, expected);
    }
}
