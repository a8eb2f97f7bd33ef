//! Store registry: open/create named or GUID-identified store instances.
//!
//! Opening is idempotent — two opens of the same identity yield handles
//! over the same underlying backend, with the same entries visible. Many
//! instances may be open concurrently; release is an explicit, idempotent
//! no-op for unknown identities.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use depot_core::error::Result;

use crate::memory::MemoryBackend;

/// Identity of a store instance: a literal name or a parsed GUID.
///
/// A string that parses as a well-formed GUID identifies the store by GUID;
/// anything else is a literal name. `"alpha"` and a GUID rendering of the
/// same bytes are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreId {
    /// Literal name identity.
    Name(String),
    /// GUID identity.
    Guid(Uuid),
}

impl StoreId {
    /// Classify user input as a GUID or a literal name.
    pub fn parse(text: &str) -> StoreId {
        match Uuid::parse_str(text) {
            Ok(guid) => StoreId::Guid(guid),
            Err(_) => StoreId::Name(text.to_string()),
        }
    }

    /// True if this identity was parsed as a GUID.
    pub fn is_guid(&self) -> bool {
        matches!(self, StoreId::Guid(_))
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreId::Name(name) => f.write_str(name),
            StoreId::Guid(guid) => write!(f, "{}", guid),
        }
    }
}

/// Registry of open store instances.
///
/// Holds one shared [`MemoryBackend`] per identity. In the modeled scope
/// `open` only fails on a backend-unavailable condition, which the memory
/// backend never raises; the `Result` return is the contract for engines
/// that can.
#[derive(Debug, Default)]
pub struct Registry {
    stores: DashMap<StoreId, Arc<MemoryBackend>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Open or create the store identified by `name_or_id`.
    ///
    /// # Errors
    ///
    /// Never fails for the in-memory backend; engines that can be
    /// unavailable report it here rather than panicking.
    pub fn open(&self, name_or_id: &str) -> Result<(StoreId, Arc<MemoryBackend>)> {
        let id = StoreId::parse(name_or_id);
        let backend = self
            .stores
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(id = %id, guid = id.is_guid(), "creating store instance");
                Arc::new(MemoryBackend::new())
            })
            .clone();
        Ok((id, backend))
    }

    /// Release the store identified by `id`.
    ///
    /// Idempotent: releasing an unknown or already-released identity is a
    /// no-op. Returns `true` if an instance was actually dropped. Handles
    /// already holding the backend keep it alive until they are dropped.
    pub fn release(&self, id: &StoreId) -> bool {
        self.stores.remove(id).is_some()
    }

    /// Number of currently open instances.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// True if no instance is open.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
