//! Core types and traits for CQLModel Rust.
//!
//! This crate provides the foundational abstractions for tracking changes
//! and rendering them as CQL statements:
//!
//! - `Entity` trait and `FieldInfo` describing a struct's table mapping
//! - `Value` and `CqlType` for column values and their semantic kinds
//! - `reflect` for column snapshots and `literal` for literal rendering
//! - `TrackedChange` records of pending mutations
//! - `Connection`/`Connector` traits for the statement backend
//! - `Outcome` re-export from asupersync for cancel-correct operations
//! - `Cx` context for structured concurrency

// Re-export asupersync primitives for structured concurrency
pub use asupersync::{Cx, Outcome};

pub mod connection;
pub mod entity;
pub mod error;
pub mod field;
pub mod identifiers;
pub mod literal;
pub mod reflect;
pub mod tracked;
pub mod types;
pub mod value;

pub use connection::{Connection, ConnectionState, Connector};
pub use entity::Entity;
pub use error::{
    ConnectionError, ConnectionErrorKind, DmlError, DmlErrorKind, Error, QueryError,
    QueryErrorKind, Result, TrackingError, TrackingErrorKind, UnsupportedValueError,
};
pub use field::FieldInfo;
pub use identifiers::{quote_ident, quote_string};
pub use literal::{format_column_literal, format_literal};
pub use reflect::{ColumnMap, PrimaryKeySet};
pub use tracked::{MutationKind, TrackedChange};
pub use types::CqlType;
pub use value::Value;
