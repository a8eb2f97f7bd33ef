//! Depot — client-side contract for an asynchronous, versioned key-value
//! datastore.
//!
//! The workspace splits along the seams of the contract:
//!
//! - [`depot_core`]: value model, typed codec, error taxonomy, and the
//!   [`StoreBackend`] trait a backing engine implements
//! - [`depot_store`]: reference in-memory backend and the store registry
//! - [`depot_client`]: the async [`DataStore`] handle (versioned
//!   store/restore, per-operation deadlines, exactly-once resolution)
//!
//! The interactive shell lives in the `depot-cli` member (binary `depot`).
//!
//! # Example
//!
//! ```
//! use depot::{ClientConfig, DataStore, Registry, TypeTag, Value};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> depot::Result<()> {
//! let registry = Registry::new();
//! let (id, backend) = registry.open("myTestDS")?;
//! let store = DataStore::open(id.to_string(), backend, ClientConfig::default());
//!
//! let version = store.store("myIntKey", &Value::Int(31337)).await?;
//! assert_eq!(version, 1);
//!
//! let restored = store.restore_typed("myIntKey", TypeTag::Int).await?;
//! assert_eq!(restored.value, Value::Int(31337));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use depot_client::{ClientConfig, DataStore, Restored, DEFAULT_TIMEOUT};
pub use depot_core::{decode, encode, Decoded, Error, Result, StoreBackend, StoreEntry, TypeTag, Value};
pub use depot_store::{MemoryBackend, Registry, StoreId};
