//! Typed command registry.
//!
//! Each interactive command is one [`CommandKind`] with a dispatch token
//! and an arity contract, parsed into a fully-typed [`Command`] before
//! anything executes. Argument decoding happens here too, so malformed
//! input short-circuits at the parse boundary and never reaches the store.

use depot_core::codec::{self, Decoded, TypeTag};
use depot_core::error::{Error, Result};

/// A fully parsed command, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `createDataStore <nameOrGuid>` — open/create a store and make it
    /// the session's active store.
    CreateDataStore {
        /// Store name, or GUID text for a GUID identity.
        name_or_id: String,
    },
    /// `releaseDataStore` — release the active store handle.
    ReleaseDataStore,
    /// `storeKey <key> <type> <value>` — decode `value` as `type` and
    /// store it under `key`.
    StoreKey {
        /// Target key.
        key: String,
        /// The requested type tag.
        tag: TypeTag,
        /// The decoded payload (value + canonical JSON).
        decoded: Decoded,
    },
    /// `restoreKey <key>` (untyped echo) or `restoreKey <key> <type>`.
    RestoreKey {
        /// Target key.
        key: String,
        /// Decode tag; `None` echoes the raw JSON form.
        tag: Option<TypeTag>,
    },
    /// `help` — list commands and usage.
    Help,
    /// `quit` — leave the shell.
    Quit,
}

/// The registered command kinds, each owning one dispatch token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Open/create a store instance.
    CreateDataStore,
    /// Release the active store.
    ReleaseDataStore,
    /// Store a typed value under a key.
    StoreKey,
    /// Restore a key, optionally typed.
    RestoreKey,
    /// Show usage.
    Help,
    /// Leave the shell.
    Quit,
}

impl CommandKind {
    /// All kinds, in registration order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::CreateDataStore,
        CommandKind::ReleaseDataStore,
        CommandKind::StoreKey,
        CommandKind::RestoreKey,
        CommandKind::Help,
        CommandKind::Quit,
    ];

    /// The dispatch token for this kind.
    pub fn token(&self) -> &'static str {
        match self {
            CommandKind::CreateDataStore => "createDataStore",
            CommandKind::ReleaseDataStore => "releaseDataStore",
            CommandKind::StoreKey => "storeKey",
            CommandKind::RestoreKey => "restoreKey",
            CommandKind::Help => "help",
            CommandKind::Quit => "quit",
        }
    }

    /// One-line usage string.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::CreateDataStore => "createDataStore <nameOrGuid>",
            CommandKind::ReleaseDataStore => "releaseDataStore",
            CommandKind::StoreKey => "storeKey <key> <type> <value>",
            CommandKind::RestoreKey => "restoreKey <key> [type]",
            CommandKind::Help => "help",
            CommandKind::Quit => "quit",
        }
    }

    /// Parse a whitespace-split argument vector (`argv[0]` is the token)
    /// into a typed [`Command`].
    ///
    /// Arity mismatches and codec failures are reported as errors, never
    /// treated as fatal.
    pub fn parse(&self, argv: &[&str]) -> Result<Command> {
        match self {
            CommandKind::CreateDataStore => {
                expect_arity(self, argv, 2)?;
                Ok(Command::CreateDataStore {
                    name_or_id: argv[1].to_string(),
                })
            }
            CommandKind::ReleaseDataStore => {
                expect_arity(self, argv, 1)?;
                Ok(Command::ReleaseDataStore)
            }
            CommandKind::StoreKey => {
                expect_arity(self, argv, 4)?;
                let tag: TypeTag = argv[2].parse()?;
                let decoded = codec::decode(tag, argv[3])?;
                Ok(Command::StoreKey {
                    key: argv[1].to_string(),
                    tag,
                    decoded,
                })
            }
            CommandKind::RestoreKey => {
                let tag = match argv.len() {
                    2 => None,
                    3 => Some(argv[2].parse::<TypeTag>()?),
                    _ => return Err(arity_error(self, argv)),
                };
                Ok(Command::RestoreKey {
                    key: argv[1].to_string(),
                    tag,
                })
            }
            CommandKind::Help => {
                expect_arity(self, argv, 1)?;
                Ok(Command::Help)
            }
            CommandKind::Quit => {
                expect_arity(self, argv, 1)?;
                Ok(Command::Quit)
            }
        }
    }
}

fn expect_arity(kind: &CommandKind, argv: &[&str], want: usize) -> Result<()> {
    if argv.len() == want {
        Ok(())
    } else {
        Err(arity_error(kind, argv))
    }
}

fn arity_error(kind: &CommandKind, argv: &[&str]) -> Error {
    Error::Dispatch {
        token: argv[0].to_string(),
        argc: argv.len(),
        reason: format!(
            "no variant of {} takes {} argument(s); usage: {}",
            kind.token(),
            argv.len(),
            kind.usage()
        ),
    }
}
