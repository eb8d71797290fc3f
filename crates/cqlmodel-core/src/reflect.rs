//! Column snapshots of entity instances.
//!
//! The reflector reads an entity's current values into an ordered column
//! map and derives its primary-key set from the field metadata. Both
//! functions accept an absent instance and return empty collections for
//! it, leaving the decision to fail to the caller.

use indexmap::{IndexMap, IndexSet};

use crate::entity::Entity;
use crate::value::Value;

/// Ordered mapping from column name to value.
pub type ColumnMap = IndexMap<String, Value>;

/// Ordered set of primary-key column names.
pub type PrimaryKeySet = IndexSet<String>;

/// Snapshot every column of `instance`, in declaration order.
///
/// Values of fields whose declared kind is a sibling of the Rust type's
/// natural kind (e.g. an `ascii` column backed by `String`) are re-labelled
/// with [`Value::refine`]. Absent optional values stay [`Value::Null`].
pub fn properties<E: Entity>(instance: Option<&E>) -> ColumnMap {
    let Some(instance) = instance else {
        return ColumnMap::new();
    };

    let mut columns = ColumnMap::with_capacity(E::fields().len());
    for (column, value) in instance.to_row() {
        let value = match E::field(column) {
            Some(field) => value.refine(field.cql_type),
            None => value,
        };
        columns.insert(column.to_string(), value);
    }

    tracing::trace!(
        table = E::TABLE_NAME,
        columns = columns.len(),
        "Snapshotted entity columns"
    );
    columns
}

/// Primary-key columns of `instance`, in declaration order.
pub fn primary_keys<E: Entity>(instance: Option<&E>) -> PrimaryKeySet {
    if instance.is_none() {
        return PrimaryKeySet::new();
    }
    E::primary_key_columns()
        .into_iter()
        .map(str::to_string)
        .collect()
}
