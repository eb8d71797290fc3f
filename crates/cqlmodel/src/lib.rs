//! CQLModel Rust - change tracking and DML submission for CQL databases.
//!
//! CQLModel Rust records inserts, updates and deletes of plain Rust structs
//! and submits them as CQL statements, providing:
//!
//! - Compile-time table mapping with `#[derive(Entity)]`
//! - Literal rendering for every scalar CQL kind
//! - Per-table change queues drained in a reproducible order
//! - Submission over a single, lazily opened connection
//!
//! # Quick Start
//!
//! ```ignore
//! use cqlmodel::prelude::*;
//!
//! #[derive(Entity, Debug)]
//! #[cqlmodel(table = "readings")]
//! struct Reading {
//!     #[cqlmodel(primary_key)]
//!     station: String,
//!     #[cqlmodel(primary_key)]
//!     taken_at: chrono::DateTime<chrono::Utc>,
//!     celsius: Option<f64>,
//! }
//!
//! async fn record(cx: &Cx, connector: &impl Connector, reading: &Reading) -> Result<()> {
//!     let mut changes = ChangeSet::new();
//!     changes.insert_on_submit(reading)?;
//!
//!     match submit_changes(cx, connector, &mut changes, &SubmitConfig::default()).await {
//!         Outcome::Ok(_) => Ok(()),
//!         Outcome::Err(e) => Err(e),
//!         Outcome::Cancelled(_) | Outcome::Panicked(_) => Err(Error::Cancelled),
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **No runtime reflection**: table metadata is generated at compile time
//! - **Structured concurrency**: built on asupersync for cancel-correct operations
//! - **Deterministic output**: statement text is a stable, testable artifact

// Re-export all public types from sub-crates
pub use cqlmodel_core::{
    ColumnMap,
    // Connection traits
    Connection,
    ConnectionError,
    ConnectionErrorKind,
    ConnectionState,
    Connector,
    CqlType,
    // asupersync re-exports
    Cx,
    DmlError,
    DmlErrorKind,
    // Core types
    Entity,
    Error,
    FieldInfo,
    MutationKind,
    Outcome,
    PrimaryKeySet,
    QueryError,
    QueryErrorKind,
    Result,
    TrackedChange,
    TrackingError,
    TrackingErrorKind,
    UnsupportedValueError,
    Value,
    format_column_literal,
    format_literal,
    quote_ident,
    quote_string,
    reflect,
};

pub use cqlmodel_macros::Entity;

pub use cqlmodel_query::{DeleteBuilder, DmlBuilder, InsertBuilder, UpdateBuilder, build_statement};

pub use cqlmodel_session::{
    ChangeSet, EmptyUpdate, StatementExecutor, SubmitConfig, SubmitReport, submit_changes,
};

// ============================================================================
// Generic Entity Support Tests
// ============================================================================
//
// Generic parameters work when `Value: From<T>` holds for the stored
// fields, or when the generic only appears on skipped fields.


/// Prelude module for convenient imports.
///
/// ```ignore
/// use cqlmodel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Tracking
        ChangeSet,
        // Connection traits
        Connection,
        ConnectionState,
        Connector,
        CqlType,
        // asupersync
        Cx,
        EmptyUpdate,
        // Entity trait and derive
        Entity,
        Error,
        MutationKind,
        Outcome,
        Result,
        SubmitConfig,
        SubmitReport,
        TrackedChange,
        Value,
        submit_changes,
    };
}
