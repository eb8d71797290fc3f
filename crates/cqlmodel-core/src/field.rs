//! Field and column definitions.

use crate::types::CqlType;

/// Metadata about an entity field/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Rust field name
    pub name: &'static str,
    /// Database column name (may differ from field name)
    pub column_name: &'static str,
    /// Semantic kind of the column (for `Option<T>`, the kind of `T`)
    pub cql_type: CqlType,
    /// Whether this field is nullable
    pub nullable: bool,
    /// Whether this is a primary key column
    pub primary_key: bool,
}

impl FieldInfo {
    /// Create a new field info with minimal required data.
    pub const fn new(name: &'static str, column_name: &'static str, cql_type: CqlType) -> Self {
        Self {
            name,
            column_name,
            cql_type,
            nullable: false,
            primary_key: false,
        }
    }

    /// Set the database column name.
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column_name = name;
        self
    }

    /// Set nullable flag.
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set primary key flag.
    pub const fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }
}
