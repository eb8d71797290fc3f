//! Tracked changes awaiting submission.
//!
//! A `TrackedChange` is the immutable snapshot of one pending mutation:
//! the table, what to do, the column values at the moment the change was
//! queued, and which of those columns identify the row.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{Result, TrackingError, TrackingErrorKind};
use crate::reflect::{self, ColumnMap, PrimaryKeySet};

/// What a tracked change does to its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MutationKind {
    /// No mutation. Never a valid queued change.
    #[default]
    None,
    /// Update an existing row
    Update,
    /// Reserved: update if the row was modified
    PossibleUpdate,
    /// Insert a new row
    Insert,
    /// Reserved: insert or overwrite
    InsertOrUpdate,
    /// Delete an existing row
    Delete,
}

impl MutationKind {
    /// Get the name of this kind, for diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MutationKind::None => "None",
            MutationKind::Update => "Update",
            MutationKind::PossibleUpdate => "PossibleUpdate",
            MutationKind::Insert => "Insert",
            MutationKind::InsertOrUpdate => "InsertOrUpdate",
            MutationKind::Delete => "Delete",
        }
    }

    /// Check if this kind is reserved without a statement form.
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            MutationKind::PossibleUpdate | MutationKind::InsertOrUpdate
        )
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending mutation.
///
/// Deserialization runs the same checks as [`TrackedChange::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedChange")]
pub struct TrackedChange {
    table: String,
    kind: MutationKind,
    columns: ColumnMap,
    primary_keys: PrimaryKeySet,
}

#[derive(Deserialize)]
struct UncheckedChange {
    table: String,
    kind: MutationKind,
    columns: ColumnMap,
    primary_keys: PrimaryKeySet,
}

impl TryFrom<UncheckedChange> for TrackedChange {
    type Error = crate::Error;

    fn try_from(raw: UncheckedChange) -> Result<Self> {
        Self::new(raw.table, raw.kind, raw.columns, raw.primary_keys)
    }
}

impl TrackedChange {
    /// Create a tracked change from a prepared column snapshot.
    ///
    /// Fails if `table` is empty or if a primary key is not one of the
    /// columns.
    #[allow(clippy::result_large_err)]
    pub fn new(
        table: impl Into<String>,
        kind: MutationKind,
        columns: ColumnMap,
        primary_keys: PrimaryKeySet,
    ) -> Result<Self> {
        let table = table.into();
        if table.is_empty() {
            return Err(TrackingError {
                kind: TrackingErrorKind::EmptyTable,
                message: "cannot track a change without a table name".to_string(),
            }
            .into());
        }
        if let Some(key) = primary_keys.iter().find(|k| !columns.contains_key(*k)) {
            return Err(TrackingError {
                kind: TrackingErrorKind::UnknownPrimaryKey,
                message: format!("primary key '{key}' is not a column of table '{table}'"),
            }
            .into());
        }
        Ok(Self {
            table,
            kind,
            columns,
            primary_keys,
        })
    }

    /// Snapshot an entity instance.
    ///
    /// Fails with [`TrackingErrorKind::MissingInstance`] if `instance` is
    /// `None`.
    #[allow(clippy::result_large_err)]
    pub fn capture<E: Entity>(
        table: impl Into<String>,
        kind: MutationKind,
        instance: Option<&E>,
    ) -> Result<Self> {
        let table = table.into();
        if instance.is_none() {
            return Err(TrackingError {
                kind: TrackingErrorKind::MissingInstance,
                message: format!("no instance supplied for {kind} on table '{table}'"),
            }
            .into());
        }
        Self::new(
            table,
            kind,
            reflect::properties(instance),
            reflect::primary_keys(instance),
        )
    }

    /// Snapshot an entity instance for its own table.
    #[allow(clippy::result_large_err)]
    pub fn of<E: Entity>(kind: MutationKind, instance: &E) -> Result<Self> {
        Self::capture(E::TABLE_NAME, kind, Some(instance))
    }

    /// Table the change applies to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// What the change does.
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Column values, in declaration order.
    pub const fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Primary-key columns, in declaration order.
    pub const fn primary_keys(&self) -> &PrimaryKeySet {
        &self.primary_keys
    }

    /// Check if a column is part of the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.contains(column)
    }
}
