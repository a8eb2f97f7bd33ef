//! Client configuration.

use std::time::Duration;

/// Default per-operation deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a [`DataStore`](crate::DataStore) handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline per pending operation. An operation that has not resolved
    /// within this window resolves with a timeout error instead of
    /// remaining pending forever.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a config with the default deadline.
    pub fn new() -> Self {
        ClientConfig::default()
    }

    /// Set the per-operation deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
