//! Statement builders for INSERT, UPDATE, DELETE operations.
//!
//! Every builder renders one complete statement terminated by `;`, with
//! identifiers quoted by [`quote_ident`] and values inlined through the
//! literal formatter.

use cqlmodel_core::{
    ColumnMap, DmlError, DmlErrorKind, Error, MutationKind, PrimaryKeySet, Result, TrackedChange,
    TrackingError, TrackingErrorKind, Value, format_column_literal, quote_ident,
};

/// Dispatches a tracked change to the builder for its mutation kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmlBuilder;

impl DmlBuilder {
    /// Create a new statement builder.
    pub const fn new() -> Self {
        Self
    }

    /// Build the statement for `change` against `table`.
    ///
    /// Fails for the reserved kinds and for [`MutationKind::None`]; never
    /// returns an empty statement.
    #[allow(clippy::result_large_err)]
    pub fn build(&self, table: &str, change: &TrackedChange) -> Result<String> {
        tracing::trace!(table, kind = %change.kind(), "Building statement");
        match change.kind() {
            MutationKind::Insert => InsertBuilder::new(table, change).build(),
            MutationKind::Update => UpdateBuilder::new(table, change).build(),
            MutationKind::Delete => DeleteBuilder::new(table, change).build(),
            kind if kind.is_reserved() => Err(dml_error(
                table,
                DmlErrorKind::Unimplemented(kind),
                format!("{kind} is not yet implemented"),
            )),
            kind => Err(dml_error(
                table,
                DmlErrorKind::InvalidState(kind),
                format!("{kind} is not a submittable mutation"),
            )),
        }
    }
}

/// Build the statement for a tracked change against its own table.
#[allow(clippy::result_large_err)]
pub fn build_statement(change: &TrackedChange) -> Result<String> {
    DmlBuilder::new().build(change.table(), change)
}

/// INSERT statement builder.
#[derive(Debug)]
pub struct InsertBuilder<'a> {
    table: &'a str,
    change: &'a TrackedChange,
}

impl<'a> InsertBuilder<'a> {
    /// Create a new INSERT builder for the given change.
    pub fn new(table: &'a str, change: &'a TrackedChange) -> Self {
        Self { table, change }
    }

    /// Build `INSERT INTO "t" ("a","b") VALUES (1,'x');`.
    #[allow(clippy::result_large_err)]
    pub fn build(&self) -> Result<String> {
        let columns = self.change.columns();
        if columns.is_empty() {
            return Err(dml_error(
                self.table,
                DmlErrorKind::NoColumns,
                "cannot insert a row without columns".to_string(),
            ));
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, value) in columns {
            names.push(quote_ident(name));
            values.push(format_column_literal(name, value)?);
        }

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            quote_ident(self.table),
            names.join(","),
            values.join(",")
        ))
    }
}

/// UPDATE statement builder.
#[derive(Debug)]
pub struct UpdateBuilder<'a> {
    table: &'a str,
    change: &'a TrackedChange,
}

impl<'a> UpdateBuilder<'a> {
    /// Create a new UPDATE builder for the given change.
    pub fn new(table: &'a str, change: &'a TrackedChange) -> Self {
        Self { table, change }
    }

    /// Build `UPDATE "t" SET "b" = 'x' WHERE "a" = 1;`.
    ///
    /// Every non-key column is assigned; the primary key selects the row.
    #[allow(clippy::result_large_err)]
    pub fn build(&self) -> Result<String> {
        let where_clause = key_predicate(self.table, self.change)?;

        let set_clauses = self
            .change
            .columns()
            .iter()
            .filter(|(name, _)| !self.change.is_primary_key(name))
            .map(|(name, value)| assignment(name, value))
            .collect::<Result<Vec<_>>>()?;

        if set_clauses.is_empty() {
            return Err(dml_error(
                self.table,
                DmlErrorKind::EmptyUpdate,
                "every column is part of the primary key; nothing to update".to_string(),
            ));
        }

        Ok(format!(
            "UPDATE {} SET {} WHERE {};",
            quote_ident(self.table),
            set_clauses.join(", "),
            where_clause
        ))
    }
}

/// DELETE statement builder.
#[derive(Debug)]
pub struct DeleteBuilder<'a> {
    table: &'a str,
    change: &'a TrackedChange,
}

impl<'a> DeleteBuilder<'a> {
    /// Create a new DELETE builder for the given change.
    pub fn new(table: &'a str, change: &'a TrackedChange) -> Self {
        Self { table, change }
    }

    /// Build `DELETE FROM "t" WHERE "a" = 1;`.
    #[allow(clippy::result_large_err)]
    pub fn build(&self) -> Result<String> {
        let where_clause = key_predicate(self.table, self.change)?;
        Ok(format!(
            "DELETE FROM {} WHERE {};",
            quote_ident(self.table),
            where_clause
        ))
    }
}

/// `"a" = 1 AND "b" = 'x'` over the primary key, in key order.
fn key_predicate(table: &str, change: &TrackedChange) -> Result<String> {
    key_conditions(table, change.kind(), change.columns(), change.primary_keys())
}

fn key_conditions(
    table: &str,
    kind: MutationKind,
    columns: &ColumnMap,
    keys: &PrimaryKeySet,
) -> Result<String> {
    if keys.is_empty() {
        return Err(dml_error(
            table,
            DmlErrorKind::MissingPrimaryKey,
            format!("{kind} requires at least one primary key column"),
        ));
    }

    let conditions = keys
        .iter()
        .map(|key| match columns.get(key) {
            Some(value) => assignment(key, value),
            None => Err(Error::Tracking(TrackingError {
                kind: TrackingErrorKind::UnknownPrimaryKey,
                message: format!("primary key '{key}' is not a column of table '{table}'"),
            })),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(conditions.join(" AND "))
}

fn assignment(column: &str, value: &Value) -> Result<String> {
    Ok(format!(
        "{} = {}",
        quote_ident(column),
        format_column_literal(column, value)?
    ))
}

fn dml_error(table: &str, kind: DmlErrorKind, message: String) -> Error {
    Error::Dml(DmlError {
        kind,
        table: table.to_string(),
        message,
    })
}
