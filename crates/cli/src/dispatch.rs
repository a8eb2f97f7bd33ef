//! Line → command dispatch.
//!
//! The dispatcher splits a text line on whitespace, looks the first token
//! up in the registered set, and parses the rest into a typed
//! [`Command`]. The token table is built once at construction and is
//! read-only during dispatch, so re-entrant dispatch from within command
//! execution cannot corrupt it. Unknown tokens, arity mismatches, and
//! decode failures come back as structured errors carrying the token, the
//! argument count, and the detail; the dispatcher itself never falls over
//! on a failed line.

use std::collections::HashMap;

use depot_core::error::{Error, Result};

use crate::command::{Command, CommandKind};

/// Token-keyed registry of command kinds.
pub struct Dispatcher {
    // Registration order, for help listings.
    order: Vec<CommandKind>,
    table: HashMap<&'static str, CommandKind>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}

impl Dispatcher {
    /// Build the dispatcher with the full command set registered.
    pub fn new() -> Self {
        Dispatcher::with_commands(&CommandKind::ALL)
    }

    /// Build a dispatcher over an explicit command set, preserving
    /// registration order.
    pub fn with_commands(kinds: &[CommandKind]) -> Self {
        let mut order = Vec::with_capacity(kinds.len());
        let mut table = HashMap::with_capacity(kinds.len());
        for &kind in kinds {
            // Last registration of a token wins, matching table semantics.
            if table.insert(kind.token(), kind).is_none() {
                order.push(kind);
            }
        }
        Dispatcher { order, table }
    }

    /// Registered kinds in registration order.
    pub fn commands(&self) -> &[CommandKind] {
        &self.order
    }

    /// Parse one input line into a typed command.
    ///
    /// A leading `/` on the command token is accepted and stripped — the
    /// original interactive channel prefixed every command that way.
    pub fn dispatch(&self, line: &str) -> Result<Command> {
        let argv: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = argv.first() else {
            return Err(Error::Dispatch {
                token: String::new(),
                argc: 0,
                reason: "empty command line".to_string(),
            });
        };

        let token = first.strip_prefix('/').unwrap_or(first);
        let kind = self.table.get(token).ok_or_else(|| Error::Dispatch {
            token: first.to_string(),
            argc: argv.len(),
            reason: format!("unknown command; try one of: {}", self.token_list()),
        })?;

        kind.parse(&argv)
    }

    fn token_list(&self) -> String {
        self.order
            .iter()
            .map(|k| k.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::codec::TypeTag;
    use depot_core::value::Value;

    #[test]
    fn dispatch_parses_a_full_line() {
        let dispatcher = Dispatcher::new();
        let cmd = dispatcher
            .dispatch("storeKey myIntArrayKey int[] [1,-2,9]")
            .unwrap();
        match cmd {
            Command::StoreKey { key, tag, decoded } => {
                assert_eq!(key, "myIntArrayKey");
                assert_eq!(tag, TypeTag::IntArray);
                assert_eq!(decoded.value, Value::IntArray(vec![1, -2, 9]));
            }
            other => panic!("expected StoreKey, got {:?}", other),
        }
    }

    #[test]
    fn leading_slash_is_accepted() {
        let dispatcher = Dispatcher::new();
        let cmd = dispatcher.dispatch("/createDataStore myTestDS").unwrap();
        assert_eq!(
            cmd,
            Command::CreateDataStore {
                name_or_id: "myTestDS".into()
            }
        );
    }

    #[test]
    fn unknown_token_reports_dispatch_error() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher.dispatch("/doesNotExist a b").unwrap_err();
        match err {
            Error::Dispatch { token, argc, .. } => {
                assert_eq!(token, "/doesNotExist");
                assert_eq!(argc, 3);
            }
            other => panic!("expected Dispatch, got {:?}", other),
        }
    }

    #[test]
    fn table_survives_a_failed_dispatch() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.dispatch("/doesNotExist a b").is_err());
        assert!(dispatcher.dispatch("storeKey k int notANumber").is_err());

        // Subsequent valid dispatches still succeed.
        assert!(dispatcher.dispatch("restoreKey k").is_ok());
        assert_eq!(dispatcher.commands().len(), CommandKind::ALL.len());
    }

    #[test]
    fn empty_line_is_a_dispatch_error() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher.dispatch("   ").unwrap_err();
        assert!(matches!(err, Error::Dispatch { argc: 0, .. }));
    }

    #[test]
    fn malformed_payload_never_reaches_parse_success() {
        // Codec failure surfaces at dispatch; no Command is produced, so
        // nothing downstream can issue a store operation.
        let dispatcher = Dispatcher::new();
        let err = dispatcher.dispatch("storeKey k int notANumber").unwrap_err();
        assert!(err.is_codec_error());
    }

    #[test]
    fn registration_order_is_preserved() {
        let dispatcher = Dispatcher::with_commands(&[
            CommandKind::RestoreKey,
            CommandKind::StoreKey,
            CommandKind::RestoreKey,
        ]);
        assert_eq!(
            dispatcher.commands(),
            &[CommandKind::RestoreKey, CommandKind::StoreKey]
        );
    }
}
