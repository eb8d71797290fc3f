//! Error types for CQLModel operations.

use crate::tracked::MutationKind;
use crate::types::CqlType;
use std::fmt;

/// The primary error type for all CQLModel operations.
#[derive(Debug)]
pub enum Error {
    /// Connection-related errors (open, reopen, close)
    Connection(ConnectionError),
    /// Statement execution errors reported by the backend
    Query(QueryError),
    /// A tracked value has no literal form
    UnsupportedValue(UnsupportedValueError),
    /// A statement could not be built for a tracked change
    Dml(DmlError),
    /// A change could not be tracked
    Tracking(TrackingError),
    /// Operation was cancelled via asupersync
    Cancelled,
    /// Custom error with message
    Custom(String),
}

#[derive(Debug)]
pub struct ConnectionError {
    pub kind: ConnectionErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// Failed to create or open a connection
    Open,
    /// A closed or broken connection could not be re-opened
    Reopen,
    /// Connection lost during operation
    Disconnected,
    /// Releasing the connection failed
    Close,
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub cql: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Syntax error in the statement
    Syntax,
    /// Statement is valid but refers to unknown tables or columns
    Invalid,
    /// Not enough replicas were available
    Unavailable,
    /// Write or read timeout on the coordinator
    Timeout,
    /// Permission denied
    Unauthorized,
    /// Other backend error
    Server,
}

/// A value with no literal mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedValueError {
    /// The offending kind
    pub kind: CqlType,
    /// Column the value was tracked under, when known
    pub column: Option<String>,
    /// Extra detail (e.g. a malformed varint)
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmlError {
    pub kind: DmlErrorKind,
    pub table: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmlErrorKind {
    /// The mutation kind is reserved but has no statement form yet
    Unimplemented(MutationKind),
    /// The mutation kind can never reach the builder
    InvalidState(MutationKind),
    /// UPDATE/DELETE for a record without primary key columns
    MissingPrimaryKey,
    /// UPDATE whose SET list would be empty
    EmptyUpdate,
    /// INSERT without any columns
    NoColumns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingError {
    pub kind: TrackingErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingErrorKind {
    /// No instance was supplied
    MissingInstance,
    /// The table name is empty
    EmptyTable,
    /// A primary key is not one of the record's columns
    UnknownPrimaryKey,
}

impl Error {
    /// Is this a connection error that likely requires reconnection?
    pub fn is_connection_error(&self) -> bool {
        match self {
            Error::Connection(c) => matches!(
                c.kind,
                ConnectionErrorKind::Open
                    | ConnectionErrorKind::Reopen
                    | ConnectionErrorKind::Disconnected
            ),
            _ => false,
        }
    }

    /// Get the statement text that caused this error, if available
    pub fn cql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.cql.as_deref(),
            _ => None,
        }
    }

    /// Get the DML error kind, if this is a builder error.
    pub fn dml_kind(&self) -> Option<DmlErrorKind> {
        match self {
            Error::Dml(d) => Some(d.kind),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection(e) => write!(f, "Connection error: {}", e.message),
            Error::Query(e) => write!(f, "Query error: {}", e.message),
            Error::UnsupportedValue(e) => write!(f, "Unsupported value: {}", e),
            Error::Dml(e) => write!(f, "DML error on table '{}': {}", e.table, e.message),
            Error::Tracking(e) => write!(f, "Tracking error: {}", e.message),
            Error::Cancelled => write!(f, "Operation cancelled"),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Query(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for UnsupportedValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(col) => write!(
                f,
                "unable to translate {} value in column '{}' to a literal",
                self.kind, col
            )?,
            None => write!(f, "unable to translate {} value to a literal", self.kind)?,
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl fmt::Display for DmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Error::Connection(err)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<UnsupportedValueError> for Error {
    fn from(err: UnsupportedValueError) -> Self {
        Error::UnsupportedValue(err)
    }
}

impl From<DmlError> for Error {
    fn from(err: DmlError) -> Self {
        Error::Dml(err)
    }
}

impl From<TrackingError> for Error {
    fn from(err: TrackingError) -> Self {
        Error::Tracking(err)
    }
}

/// Result type alias for CQLModel operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cql_helper() {
        let err = Error::Query(QueryError {
            kind: QueryErrorKind::Syntax,
            cql: Some("DELETE FROM \"t\" WHERE \"id\" = 1;".to_string()),
            message: "line 1:0 no viable alternative".to_string(),
            source: None,
        });
        assert_eq!(err.cql(), Some("DELETE FROM \"t\" WHERE \"id\" = 1;"));
        assert!(!err.is_connection_error());
        assert_eq!(err.to_string(), "Query error: line 1:0 no viable alternative");
    }

    #[test]
    fn connection_flags() {
        let reopen = Error::Connection(ConnectionError {
            kind: ConnectionErrorKind::Reopen,
            message: "host unreachable".to_string(),
            source: None,
        });
        assert!(reopen.is_connection_error());

        let close = Error::Connection(ConnectionError {
            kind: ConnectionErrorKind::Close,
            message: "close failed".to_string(),
            source: None,
        });
        assert!(!close.is_connection_error());
    }

    #[test]
    fn unsupported_value_message_names_kind_and_column() {
        let err = Error::UnsupportedValue(UnsupportedValueError {
            kind: CqlType::Inet,
            column: Some("addr".to_string()),
            detail: None,
        });
        assert_eq!(
            err.to_string(),
            "Unsupported value: unable to translate inet value in column 'addr' to a literal"
        );
    }

    #[test]
    fn dml_kind_helper() {
        let err = Error::Dml(DmlError {
            kind: DmlErrorKind::Unimplemented(MutationKind::InsertOrUpdate),
            table: "t".to_string(),
            message: "InsertOrUpdate is not yet implemented".to_string(),
        });
        assert_eq!(
            err.dml_kind(),
            Some(DmlErrorKind::Unimplemented(MutationKind::InsertOrUpdate))
        );
        assert_eq!(Error::Cancelled.dml_kind(), None);
    }

    #[test]
    fn reopen_error_keeps_cause() {
        use std::error::Error as _;
        let cause = Error::Custom("connection refused".to_string());
        let err = Error::Connection(ConnectionError {
            kind: ConnectionErrorKind::Reopen,
            message: format!("failed to reopen broken connection: {cause}"),
            source: Some(Box::new(cause)),
        });
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("connection refused".to_string())
        );
    }
}
