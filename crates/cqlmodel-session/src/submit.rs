//! Submission of a change set.
//!
//! [`submit_changes`] drains a [`ChangeSet`] table by table, oldest change
//! first, turning each change into one statement and running it over a
//! single connection. The first failure stops the run. Whatever happens,
//! every queue is empty and the connection is released when it returns.

use cqlmodel_core::{
    ConnectionError, ConnectionErrorKind, Connector, Cx, DmlErrorKind, Error, MutationKind,
    Outcome,
};
use cqlmodel_query::DmlBuilder;
use serde::{Deserialize, Serialize};

use crate::change_set::ChangeSet;
use crate::executor::StatementExecutor;

/// What to do with an UPDATE whose columns are all primary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyUpdate {
    /// Fail the submission with [`DmlErrorKind::EmptyUpdate`].
    #[default]
    Reject,
    /// Drop the change and count it in [`SubmitReport::skipped`].
    Skip,
}

/// Configuration for [`submit_changes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Handling of updates with nothing to assign.
    pub empty_update: EmptyUpdate,
    /// Log each statement's text at debug level.
    pub log_statements: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            empty_update: EmptyUpdate::Reject,
            log_statements: true,
        }
    }
}

impl SubmitConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handling of empty updates (builder pattern).
    #[must_use]
    pub fn with_empty_update(mut self, value: EmptyUpdate) -> Self {
        self.empty_update = value;
        self
    }

    /// Set whether statement text is logged (builder pattern).
    #[must_use]
    pub fn with_log_statements(mut self, value: bool) -> Self {
        self.log_statements = value;
        self
    }
}

/// Counters for one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReport {
    /// Statements sent to the backend.
    pub statements: usize,
    /// INSERT statements executed.
    pub inserted: usize,
    /// UPDATE statements executed.
    pub updated: usize,
    /// DELETE statements executed.
    pub deleted: usize,
    /// Changes dropped without a statement.
    pub skipped: usize,
    /// Sum of the affected-row counts reported by the backend.
    pub rows_affected: u64,
}

impl SubmitReport {
    /// Check if nothing was executed or skipped.
    pub fn is_empty(&self) -> bool {
        self.statements == 0 && self.skipped == 0
    }

    fn record(&mut self, kind: MutationKind, rows: u64) {
        self.statements += 1;
        self.rows_affected += rows;
        match kind {
            MutationKind::Insert => self.inserted += 1,
            MutationKind::Update => self.updated += 1,
            MutationKind::Delete => self.deleted += 1,
            _ => {}
        }
    }
}

/// Empties the change set however the submission ends, including when the
/// submission future is dropped.
struct DrainGuard<'a> {
    changes: &'a mut ChangeSet,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        let discarded = self.changes.len();
        if discarded > 0 {
            tracing::warn!(discarded, "Discarding changes left after failed submission");
        }
        self.changes.clear();
    }
}

/// Submit every pending change in `changes`.
///
/// An empty change set returns an empty report without connecting. The
/// first build or execution failure is returned unchanged after the
/// connection is closed. A close failure after an otherwise successful run
/// is reported as a [`ConnectionErrorKind::Close`] error.
#[tracing::instrument(
    level = "info",
    skip(cx, connector, changes, config),
    fields(pending = changes.len())
)]
pub async fn submit_changes<C: Connector>(
    cx: &Cx,
    connector: &C,
    changes: &mut ChangeSet,
    config: &SubmitConfig,
) -> Outcome<SubmitReport, Error> {
    if changes.is_empty() {
        tracing::info!("Nothing to submit");
        changes.clear();
        return Outcome::Ok(SubmitReport::default());
    }

    let start = std::time::Instant::now();
    let mut guard = DrainGuard { changes };
    let mut executor = StatementExecutor::new(connector);

    let outcome = drain(cx, &mut executor, &mut *guard.changes, config).await;
    drop(guard);
    let closed = executor.close();

    match outcome {
        Outcome::Ok(report) => {
            if let Err(e) = closed {
                return Outcome::Err(Error::Connection(ConnectionError {
                    kind: ConnectionErrorKind::Close,
                    message: format!("failed to close connection after submission: {e}"),
                    source: Some(Box::new(e)),
                }));
            }
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis(),
                statements = report.statements,
                inserted = report.inserted,
                updated = report.updated,
                deleted = report.deleted,
                skipped = report.skipped,
                rows_affected = report.rows_affected,
                "Submission complete"
            );
            Outcome::Ok(report)
        }
        failed => {
            if let Err(e) = closed {
                tracing::warn!(error = %e, "Failed to close connection after failed submission");
            }
            failed
        }
    }
}

async fn drain<C: Connector>(
    cx: &Cx,
    executor: &mut StatementExecutor<'_, C>,
    changes: &mut ChangeSet,
    config: &SubmitConfig,
) -> Outcome<SubmitReport, Error> {
    let builder = DmlBuilder::new();
    let mut report = SubmitReport::default();

    while let Some(change) = changes.pop_next() {
        let cql = match builder.build(change.table(), &change) {
            Ok(cql) => cql,
            Err(e)
                if config.empty_update == EmptyUpdate::Skip
                    && e.dml_kind() == Some(DmlErrorKind::EmptyUpdate) =>
            {
                tracing::debug!(
                    table = change.table(),
                    "Skipping update with no assignable columns"
                );
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(
                    table = change.table(),
                    kind = %change.kind(),
                    error = %e,
                    "Failed to build statement"
                );
                return Outcome::Err(e);
            }
        };

        if config.log_statements {
            tracing::debug!(table = change.table(), cql = %cql, "Executing statement");
        }

        match executor.execute_non_query(cx, &cql).await {
            Outcome::Ok(rows) => {
                let rows = rows.unwrap_or(0);
                tracing::debug!(table = change.table(), rows, "Statement applied");
                report.record(change.kind(), rows);
            }
            Outcome::Err(e) => {
                tracing::warn!(
                    table = change.table(),
                    kind = %change.kind(),
                    error = %e,
                    "Statement failed"
                );
                return Outcome::Err(e);
            }
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        }
    }

    Outcome::Ok(report)
}
