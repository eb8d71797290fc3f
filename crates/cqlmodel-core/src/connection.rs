//! Database connection traits.
//!
//! This module defines the narrow connection surface the submission layer
//! consumes:
//!
//! - [`Connector`] - Creates fresh, unopened connection handles
//! - [`Connection`] - Opens, executes one statement at a time, closes
//! - [`ConnectionState`] - Observable lifecycle state of a handle
//!
//! Asynchronous operations integrate with asupersync's structured
//! concurrency via `Cx` context for proper cancellation. `close` is
//! synchronous so that a handle can be released from `Drop`.

use crate::error::Result;
use asupersync::{Cx, Outcome};
use std::future::Future;

/// Lifecycle state of a connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Created but never opened
    #[default]
    Unopened,
    /// Open and usable
    Open,
    /// Closed by the client or the server
    Closed,
    /// Failed and unusable until reopened
    Broken,
}

impl ConnectionState {
    /// Check if the handle must be replaced before it can run a statement.
    pub const fn needs_reopen(&self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Broken)
    }

    /// Get the name of this state, for diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Unopened => "unopened",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Broken => "broken",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single connection to a CQL backend.
///
/// Statements are plain text with all values already inlined as literals;
/// there are no bind parameters.
pub trait Connection: Send {
    /// Current lifecycle state.
    fn state(&self) -> ConnectionState;

    /// Open the connection.
    fn open(&mut self, cx: &Cx) -> impl Future<Output = Outcome<(), crate::Error>> + Send;

    /// Execute a statement and return the number of rows affected.
    fn execute(
        &mut self,
        cx: &Cx,
        cql: &str,
    ) -> impl Future<Output = Outcome<u64, crate::Error>> + Send;

    /// Release the connection.
    ///
    /// Closing a handle that is not open must succeed without effect.
    #[allow(clippy::result_large_err)]
    fn close(&mut self) -> Result<()>;
}

/// Factory for connection handles.
///
/// Connection strings, contact points and pooling live behind this trait.
pub trait Connector: Send + Sync {
    /// The connection type produced by this connector.
    type Conn: Connection;

    /// Create a new, unopened connection handle.
    #[allow(clippy::result_large_err)]
    fn connect(&self) -> Result<Self::Conn>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_default() {
        assert_eq!(ConnectionState::default(), ConnectionState::Unopened);
    }

    #[test]
    fn test_needs_reopen() {
        assert!(!ConnectionState::Unopened.needs_reopen());
        assert!(!ConnectionState::Open.needs_reopen());
        assert!(ConnectionState::Closed.needs_reopen());
        assert!(ConnectionState::Broken.needs_reopen());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Broken.to_string(), "broken");
        assert_eq!(ConnectionState::Open.to_string(), "open");
    }
}
