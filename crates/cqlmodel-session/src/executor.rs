//! Single-connection statement execution.
//!
//! The executor owns at most one connection handle at a time:
//!
//! ```text
//! (no handle) --connect+open--> Open --close--> (no handle)
//!                                |
//!                        Closed / Broken --close, connect+open--> Open
//! ```
//!
//! The handle is created lazily on the first non-empty statement and
//! released exactly once, either by [`StatementExecutor::close`] or when the
//! executor is dropped.

use cqlmodel_core::{
    Connection, ConnectionError, ConnectionErrorKind, ConnectionState, Connector, Cx, Error,
    Outcome, Result,
};

/// Runs statements one at a time over a lazily opened connection.
pub struct StatementExecutor<'c, C: Connector> {
    connector: &'c C,
    conn: Option<C::Conn>,
    opens: usize,
}

impl<'c, C: Connector> StatementExecutor<'c, C> {
    /// Create an executor. No connection is made until a statement runs.
    pub fn new(connector: &'c C) -> Self {
        Self {
            connector,
            conn: None,
            opens: 0,
        }
    }

    /// Number of connections opened so far.
    pub fn opens(&self) -> usize {
        self.opens
    }

    /// State of the held handle, `Unopened` when none is held.
    pub fn state(&self) -> ConnectionState {
        self.conn
            .as_ref()
            .map_or(ConnectionState::Unopened, Connection::state)
    }

    /// Execute one statement and return the rows it affected.
    ///
    /// Returns `None` without touching the connection when `cql` is empty
    /// or whitespace. A closed or broken connection is replaced once; if
    /// that fails the error has kind [`ConnectionErrorKind::Reopen`].
    #[tracing::instrument(level = "debug", skip(self, cx, cql))]
    pub async fn execute_non_query(&mut self, cx: &Cx, cql: &str) -> Outcome<Option<u64>, Error> {
        if cql.trim().is_empty() {
            tracing::trace!("Skipping empty statement");
            return Outcome::Ok(None);
        }

        match self.ensure_open(cx).await {
            Outcome::Ok(()) => {}
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        }

        let Some(conn) = self.conn.as_mut() else {
            return Outcome::Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Disconnected,
                message: "connection was released before the statement ran".to_string(),
                source: None,
            }));
        };

        match conn.execute(cx, cql).await {
            Outcome::Ok(rows) => {
                tracing::trace!(rows, "Statement executed");
                Outcome::Ok(Some(rows))
            }
            Outcome::Err(e) => Outcome::Err(e),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    /// Release the connection.
    ///
    /// Closing an executor that holds no connection is a no-op, so this can
    /// be called any number of times.
    #[allow(clippy::result_large_err)]
    pub fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            Some(mut conn) => {
                tracing::debug!(state = %conn.state(), "Closing connection");
                conn.close()
            }
            None => Ok(()),
        }
    }

    async fn ensure_open(&mut self, cx: &Cx) -> Outcome<(), Error> {
        let held = self.conn.is_some();
        match (held, self.state()) {
            (true, ConnectionState::Open) => Outcome::Ok(()),
            (true, stale) if stale.needs_reopen() => {
                tracing::debug!(state = %stale, "Reopening connection");
                if let Err(e) = self.close() {
                    tracing::warn!(error = %e, "Failed to close stale connection");
                }
                match self.connect_and_open(cx).await {
                    Outcome::Err(e) => Outcome::Err(Error::Connection(ConnectionError {
                        kind: ConnectionErrorKind::Reopen,
                        message: format!("failed to reopen {stale} connection: {e}"),
                        source: Some(Box::new(e)),
                    })),
                    other => other,
                }
            }
            (true, _) => self.open_held(cx).await,
            (false, _) => self.connect_and_open(cx).await,
        }
    }

    async fn connect_and_open(&mut self, cx: &Cx) -> Outcome<(), Error> {
        match self.connector.connect() {
            Ok(conn) => self.conn = Some(conn),
            Err(e) => return Outcome::Err(e),
        }
        self.open_held(cx).await
    }

    async fn open_held(&mut self, cx: &Cx) -> Outcome<(), Error> {
        let Some(conn) = self.conn.as_mut() else {
            return Outcome::Ok(());
        };
        match conn.open(cx).await {
            Outcome::Ok(()) => {
                self.opens += 1;
                tracing::debug!(opens = self.opens, "Connection opened");
                Outcome::Ok(())
            }
            other => other,
        }
    }
}

impl<C: Connector> Drop for StatementExecutor<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "Failed to close connection on drop");
        }
    }
}

impl<C: Connector> std::fmt::Debug for StatementExecutor<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementExecutor")
            .field("state", &self.state())
            .field("opens", &self.opens)
            .finish_non_exhaustive()
    }
}
