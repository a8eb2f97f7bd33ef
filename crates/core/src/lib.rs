//! Core types for the Depot datastore client.
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: closed enum over the supported logical types
//! - TypeTag / codec: explicit-tag text ↔ JSON conversion
//! - StoreBackend / StoreEntry: the contract a backing engine satisfies
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod codec;
pub mod error;
pub mod value;

// Re-export commonly used types
pub use backend::{StoreBackend, StoreEntry};
pub use codec::{decode, encode, Decoded, TypeTag};
pub use error::{Error, Result};
pub use value::Value;
