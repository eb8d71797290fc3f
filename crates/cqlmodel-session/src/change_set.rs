//! Per-table queues of tracked changes.
//!
//! A `ChangeSet` is owned by the caller and handed to
//! [`submit_changes`](crate::submit_changes). Tables are drained in the
//! order they were first tracked; records within a table are strictly
//! FIFO.
//!
//! # Example
//!
//! ```ignore
//! let mut changes = ChangeSet::new();
//! changes.insert_on_submit(&reading)?;
//! changes.delete_on_submit(&stale)?;
//! let report = submit_changes(&cx, &connector, &mut changes, &config).await;
//! ```

use std::collections::VecDeque;

use cqlmodel_core::{Entity, MutationKind, Result, TrackedChange};
use indexmap::IndexMap;

/// Pending changes, grouped by table.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    tables: IndexMap<String, VecDeque<TrackedChange>>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an INSERT of `instance` into its own table.
    #[allow(clippy::result_large_err)]
    pub fn insert_on_submit<E: Entity>(&mut self, instance: &E) -> Result<()> {
        self.track(E::TABLE_NAME, MutationKind::Insert, Some(instance))
    }

    /// Queue an UPDATE of `instance` in its own table.
    #[allow(clippy::result_large_err)]
    pub fn update_on_submit<E: Entity>(&mut self, instance: &E) -> Result<()> {
        self.track(E::TABLE_NAME, MutationKind::Update, Some(instance))
    }

    /// Queue a DELETE of `instance` from its own table.
    #[allow(clippy::result_large_err)]
    pub fn delete_on_submit<E: Entity>(&mut self, instance: &E) -> Result<()> {
        self.track(E::TABLE_NAME, MutationKind::Delete, Some(instance))
    }

    /// Snapshot `instance` and append it to the queue for `table`.
    ///
    /// Fails if the instance is absent or the table name is empty; nothing
    /// is queued in that case.
    #[allow(clippy::result_large_err)]
    pub fn track<E: Entity>(
        &mut self,
        table: &str,
        kind: MutationKind,
        instance: Option<&E>,
    ) -> Result<()> {
        let change = TrackedChange::capture(table, kind, instance)?;
        self.push(change);
        Ok(())
    }

    /// Append a prepared change to the queue of its table.
    pub fn push(&mut self, change: TrackedChange) {
        tracing::trace!(table = change.table(), kind = %change.kind(), "Tracked change");
        self.tables
            .entry(change.table().to_string())
            .or_default()
            .push_back(change);
    }

    /// Check if no change is pending on any table.
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(VecDeque::is_empty)
    }

    /// Total number of pending changes.
    pub fn len(&self) -> usize {
        self.tables.values().map(VecDeque::len).sum()
    }

    /// Tables with a queue, in drain order.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Pending changes for one table, oldest first.
    pub fn pending(&self, table: &str) -> impl Iterator<Item = &TrackedChange> {
        self.tables.get(table).into_iter().flatten()
    }

    /// Discard every pending change on every table.
    pub fn clear(&mut self) {
        for queue in self.tables.values_mut() {
            queue.clear();
        }
    }

    /// Remove the oldest pending change, walking tables in order.
    pub(crate) fn pop_next(&mut self) -> Option<TrackedChange> {
        self.tables.values_mut().find_map(VecDeque::pop_front)
    }
}
