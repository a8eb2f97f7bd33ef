//! Interactive session: execute commands, report results, loop over input.
//!
//! The session owns the store registry and the single "active" store the
//! interactive commands operate on. Startup command lines run first (in
//! order), then lines are read from stdin until EOF or `quit`. Every
//! failure is reported as a one-line message; no failed command terminates
//! the session.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use depot_client::{ClientConfig, DataStore};
use depot_core::error::{Error, Result};
use depot_store::{Registry, StoreId};

use crate::command::Command;
use crate::dispatch::Dispatcher;

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading input.
    Continue,
    /// Leave the shell.
    Quit,
}

/// Interactive session state.
pub struct Session {
    registry: Registry,
    config: ClientConfig,
    dispatcher: Dispatcher,
    active: Option<(StoreId, DataStore)>,
}

impl Session {
    /// Create a session with no active store.
    pub fn new(config: ClientConfig) -> Self {
        Session {
            registry: Registry::new(),
            config,
            dispatcher: Dispatcher::new(),
            active: None,
        }
    }

    /// The currently active store handle, if any.
    pub fn active_store(&self) -> Option<&DataStore> {
        self.active.as_ref().map(|(_, ds)| ds)
    }

    /// Dispatch and execute one input line, reporting the outcome.
    ///
    /// Blank lines and `#` comments are skipped. Dispatch and execution
    /// failures are rendered as one-line diagnostics on stderr; the
    /// session always remains usable afterwards.
    pub async fn run_line(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return LineOutcome::Continue;
        }

        tracing::info!(command = trimmed, "starting command");
        let command = match self.dispatcher.dispatch(trimmed) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("(error) {}", e);
                return LineOutcome::Continue;
            }
        };

        if command == Command::Quit {
            return LineOutcome::Quit;
        }

        match self.execute(command).await {
            Ok(report) => println!("{}", report),
            Err(e) => eprintln!("(error) {}", e),
        }
        tracing::debug!(command = trimmed, "command executed");
        LineOutcome::Continue
    }

    /// Execute a parsed command, returning the human-readable result line.
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::CreateDataStore { name_or_id } => {
                let (id, backend) = self.registry.open(&name_or_id)?;
                if id.is_guid() {
                    tracing::info!(id = %id, "creating DataStore with GUID");
                } else {
                    tracing::info!(id = %id, "creating DataStore with name");
                }
                let handle = DataStore::open(id.to_string(), backend, self.config);
                self.active = Some((id.clone(), handle));
                Ok(format!("Active DataStore is now {}", id))
            }
            Command::ReleaseDataStore => match self.active.take() {
                Some((id, handle)) => {
                    handle.release();
                    self.registry.release(&id);
                    Ok(format!("Released DataStore {}", id))
                }
                None => Ok("No active DataStore to release".to_string()),
            },
            Command::StoreKey { key, tag, decoded } => {
                let store = self.require_active()?;
                tracing::debug!(key = %key, tag = %tag, json = %decoded.json, "storing key");
                let version = store.store_json(&key, decoded.json).await?;
                Ok(format!("Stored key {} with version={}", key, version))
            }
            Command::RestoreKey { key, tag: None } => {
                let store = self.require_active()?;
                let entry = store.restore(&key).await?;
                Ok(format!(
                    "Restored {} has JSON value '{}' (version {})",
                    key, entry.json, entry.version
                ))
            }
            Command::RestoreKey {
                key,
                tag: Some(tag),
            } => {
                let store = self.require_active()?;
                let restored = store.restore_typed(&key, tag).await?;
                Ok(format!(
                    "Restored {} has {} value {} (version {})",
                    key, tag, restored.value, restored.version
                ))
            }
            Command::Help => {
                let lines: Vec<&str> = self
                    .dispatcher
                    .commands()
                    .iter()
                    .map(|kind| kind.usage())
                    .collect();
                Ok(lines.join("\n"))
            }
            Command::Quit => Ok(String::new()),
        }
    }

    fn require_active(&self) -> Result<&DataStore> {
        self.active
            .as_ref()
            .map(|(_, ds)| ds)
            .ok_or_else(|| Error::unavailable("no active DataStore; run createDataStore first"))
    }
}

/// Run startup lines, then read lines from stdin until EOF or `quit`.
///
/// Returns the process exit code. `interactive` controls the prompt.
pub async fn run(session: &mut Session, startup: &[String], interactive: bool) -> i32 {
    for line in startup {
        if session.run_line(line).await == LineOutcome::Quit {
            return 0;
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        if interactive {
            let _ = stdout.write_all(b"depot> ").await;
            let _ = stdout.flush().await;
        }
        match lines.next_line().await {
            Ok(Some(line)) => {
                if session.run_line(&line).await == LineOutcome::Quit {
                    return 0;
                }
            }
            Ok(None) => return 0,
            Err(e) => {
                eprintln!("(error) failed to read input: {}", e);
                return 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::codec::TypeTag;
    use depot_core::value::Value;

    fn session() -> Session {
        Session::new(ClientConfig::default())
    }

    async fn exec(session: &mut Session, line: &str) -> Result<String> {
        let command = Dispatcher::new().dispatch(line)?;
        session.execute(command).await
    }

    #[tokio::test]
    async fn create_store_then_roundtrip_int() {
        let mut s = session();
        let report = exec(&mut s, "/createDataStore myTestDS").await.unwrap();
        assert_eq!(report, "Active DataStore is now myTestDS");

        let report = exec(&mut s, "/storeKey myIntKey int 31337").await.unwrap();
        assert_eq!(report, "Stored key myIntKey with version=1");

        let report = exec(&mut s, "/restoreKey myIntKey int").await.unwrap();
        assert!(report.contains("31337"));
        assert!(report.contains("version 1"));
    }

    #[tokio::test]
    async fn store_without_active_store_is_reported() {
        let mut s = session();
        let err = exec(&mut s, "storeKey k int 1").await.unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable { .. }));
    }

    #[tokio::test]
    async fn untyped_restore_echoes_json() {
        let mut s = session();
        exec(&mut s, "createDataStore ds").await.unwrap();
        exec(&mut s, "storeKey myStringKey string greatValue")
            .await
            .unwrap();

        let report = exec(&mut s, "restoreKey myStringKey").await.unwrap();
        assert!(report.contains(r#"'"greatValue"'"#));
    }

    #[tokio::test]
    async fn release_is_idempotent_at_the_command_level() {
        let mut s = session();
        exec(&mut s, "createDataStore ds").await.unwrap();
        assert_eq!(
            exec(&mut s, "releaseDataStore").await.unwrap(),
            "Released DataStore ds"
        );
        assert_eq!(
            exec(&mut s, "releaseDataStore").await.unwrap(),
            "No active DataStore to release"
        );
    }

    #[tokio::test]
    async fn typed_restore_uses_tag_from_command() {
        let mut s = session();
        exec(&mut s, "createDataStore ds").await.unwrap();
        exec(&mut s, "storeKey arr int[] [1,-2,9]").await.unwrap();

        let store = s.active_store().unwrap();
        let restored = store.restore_typed("arr", TypeTag::IntArray).await.unwrap();
        assert_eq!(restored.value, Value::IntArray(vec![1, -2, 9]));
    }

    #[tokio::test]
    async fn failed_line_leaves_session_usable() {
        let mut s = session();
        assert!(exec(&mut s, "/doesNotExist a b").await.is_err());
        assert!(exec(&mut s, "storeKey k int notANumber").await.is_err());
        assert!(exec(&mut s, "createDataStore ds").await.is_ok());
        assert!(exec(&mut s, "storeKey k int 1").await.is_ok());
    }
}
