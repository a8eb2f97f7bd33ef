//! Reference backend and store registry for Depot.
//!
//! - [`MemoryBackend`]: in-memory versioned key-value engine
//! - [`Registry`] / [`StoreId`]: idempotent open/create of named or
//!   GUID-identified store instances

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod registry;

pub use memory::MemoryBackend;
pub use registry::{Registry, StoreId};
