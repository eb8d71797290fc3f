//! Recording connector shared by the executor and submission tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use cqlmodel_core::{
    Connection, ConnectionError, ConnectionErrorKind, ConnectionState, Connector, Cx, Error,
    Outcome, QueryError, QueryErrorKind, Result,
};

#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub connects: usize,
    pub opens: usize,
    pub closes: usize,
    pub executed: Vec<String>,
    /// Rows reported for every successful statement.
    pub rows: u64,
    /// Zero-based index of the statement the backend rejects.
    pub fail_statement: Option<usize>,
    /// Number of `connect` calls allowed before connecting fails.
    pub connect_limit: Option<usize>,
    /// Leave each connection `Broken` after one statement.
    pub break_after_execute: bool,
    /// Leave each connection `Closed` after one statement.
    pub close_after_execute: bool,
    pub fail_close: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockConnector {
    pub state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(configure: impl FnOnce(&mut MockState)) -> Self {
        let connector = Self::new();
        configure(&mut connector.state.lock().expect("lock poisoned"));
        connector
    }

    pub fn snapshot<T>(&self, read: impl FnOnce(&MockState) -> T) -> T {
        read(&self.state.lock().expect("lock poisoned"))
    }
}

impl Connector for MockConnector {
    type Conn = MockConnection;

    fn connect(&self) -> Result<MockConnection> {
        let mut guard = self.state.lock().expect("lock poisoned");
        if guard.connect_limit.is_some_and(|limit| guard.connects >= limit) {
            return Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Open,
                message: "no hosts available".to_string(),
                source: None,
            }));
        }
        guard.connects += 1;
        Ok(MockConnection {
            shared: Arc::clone(&self.state),
            state: ConnectionState::Unopened,
        })
    }
}

#[derive(Debug)]
pub(crate) struct MockConnection {
    shared: Arc<Mutex<MockState>>,
    state: ConnectionState,
}

impl Connection for MockConnection {
    fn state(&self) -> ConnectionState {
        self.state
    }

    fn open(&mut self, _cx: &Cx) -> impl Future<Output = Outcome<(), Error>> + Send {
        self.shared.lock().expect("lock poisoned").opens += 1;
        self.state = ConnectionState::Open;
        std::future::ready(Outcome::Ok(()))
    }

    fn execute(
        &mut self,
        _cx: &Cx,
        cql: &str,
    ) -> impl Future<Output = Outcome<u64, Error>> + Send {
        let mut guard = self.shared.lock().expect("lock poisoned");
        let index = guard.executed.len();
        guard.executed.push(cql.to_string());
        if guard.break_after_execute {
            self.state = ConnectionState::Broken;
        } else if guard.close_after_execute {
            self.state = ConnectionState::Closed;
        }
        let outcome = if guard.fail_statement == Some(index) {
            Outcome::Err(Error::Query(QueryError {
                kind: QueryErrorKind::Invalid,
                cql: Some(cql.to_string()),
                message: "unconfigured table".to_string(),
                source: None,
            }))
        } else {
            Outcome::Ok(guard.rows)
        };
        std::future::ready(outcome)
    }

    fn close(&mut self) -> Result<()> {
        if self.state == ConnectionState::Unopened {
            return Ok(());
        }
        self.state = ConnectionState::Closed;
        let mut guard = self.shared.lock().expect("lock poisoned");
        guard.closes += 1;
        if guard.fail_close {
            return Err(Error::Custom("socket already shut down".to_string()));
        }
        Ok(())
    }
}

pub(crate) fn unwrap_outcome<T: std::fmt::Debug>(outcome: Outcome<T, Error>) -> T {
    match outcome {
        Outcome::Ok(v) => v,
        other => std::panic::panic_any(format!("unexpected outcome: {other:?}")),
    }
}

pub(crate) fn unwrap_err<T: std::fmt::Debug>(outcome: Outcome<T, Error>) -> Error {
    match outcome {
        Outcome::Err(e) => e,
        other => std::panic::panic_any(format!("expected an error, got: {other:?}")),
    }
}
