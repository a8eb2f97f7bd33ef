//! Command dispatch and interactive shell for the Depot datastore client.
//!
//! - [`Command`] / [`CommandKind`]: typed command registry
//! - [`Dispatcher`]: whitespace-token line dispatch
//! - [`Session`] / [`shell::run`]: startup command replay + stdin loop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod dispatch;
pub mod shell;

pub use command::{Command, CommandKind};
pub use dispatch::Dispatcher;
pub use shell::{LineOutcome, Session};
