//! Change sets and submission for CQLModel Rust.
//!
//! `cqlmodel-session` is the **unit-of-work layer**. Application code
//! records pending mutations in a caller-owned [`ChangeSet`] and hands it
//! to [`submit_changes`], which turns each change into one DML statement
//! and runs it over a single connection.
//!
//! # Role In The Architecture
//!
//! - **Change set**: per-table FIFO queues of tracked changes.
//! - **Statement executor**: lazily opened, self-healing connection that
//!   runs one statement at a time.
//! - **Submission**: drain, build, execute; stop at the first failure and
//!   always leave the change set empty and the connection closed.
//!
//! # Example
//!
//! ```ignore
//! let mut changes = ChangeSet::new();
//! changes.insert_on_submit(&reading)?;
//! changes.update_on_submit(&station)?;
//!
//! match submit_changes(&cx, &connector, &mut changes, &SubmitConfig::default()).await {
//!     Outcome::Ok(report) => println!("{} statements", report.statements),
//!     Outcome::Err(e) => return Err(e),
//!     other => { /* cancelled or panicked */ }
//! }
//! ```

pub mod change_set;
pub mod executor;
pub mod submit;

#[cfg(test)]
#[allow(clippy::manual_async_fn)]
mod mock;

pub use change_set::ChangeSet;
pub use executor::StatementExecutor;
pub use submit::{EmptyUpdate, SubmitConfig, SubmitReport, submit_changes};
