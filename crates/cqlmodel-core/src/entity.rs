//! Entity trait for describing tracked structs.
//!
//! The `Entity` trait is the compile-time schema of a struct whose changes
//! can be queued and submitted: the table it maps to, its ordered fields
//! with their primary-key flags, and a snapshot of its current values. It
//! is typically derived using the `#[derive(Entity)]` macro from
//! `cqlmodel-macros`.

use crate::field::FieldInfo;
use crate::value::Value;

/// Trait for types that map to a CQL table.
///
/// # Example
///
/// ```ignore
/// use cqlmodel::Entity;
///
/// #[derive(Entity)]
/// #[cqlmodel(table = "TestTable")]
/// struct TestEntry {
///     #[cqlmodel(primary_key)]
///     id: i32,
///     value: Option<String>,
/// }
/// ```
pub trait Entity {
    /// The name of the table.
    const TABLE_NAME: &'static str;

    /// Get field metadata for all columns, in declaration order.
    fn fields() -> &'static [FieldInfo];

    /// Snapshot the current values, one per field, in declaration order.
    ///
    /// Column names are the `column_name`s of [`Entity::fields`].
    fn to_row(&self) -> Vec<(&'static str, Value)>;

    /// Column names of the primary key, in declaration order.
    fn primary_key_columns() -> Vec<&'static str> {
        Self::fields()
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| f.column_name)
            .collect()
    }

    /// Look up a field by its column name.
    fn field(column_name: &str) -> Option<&'static FieldInfo> {
        Self::fields().iter().find(|f| f.column_name == column_name)
    }
}
