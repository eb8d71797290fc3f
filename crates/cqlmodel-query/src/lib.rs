//! CQL statement builders for CQLModel Rust.
//!
//! `cqlmodel-query` is the **statement construction layer**. It turns a
//! tracked change into one INSERT, UPDATE or DELETE statement with every
//! value inlined as a literal.
//!
//! # Role In The Architecture
//!
//! - **Input**: `TrackedChange` records from `cqlmodel-core`.
//! - **Output**: statement text, executed one at a time by the session layer.
//!
//! Building is pure and deterministic: the same change always yields the
//! same text.

pub mod builder;

pub use builder::{DeleteBuilder, DmlBuilder, InsertBuilder, UpdateBuilder, build_statement};
