//! CQL semantic kinds.

use serde::{Deserialize, Serialize};

/// The semantic kind of a column value.
///
/// This is the closed set of kinds the literal formatter knows about.
/// Only a subset can be rendered as a literal; the collection kinds and
/// `Inet` are described here so that entities using them fail loudly at
/// submit time instead of producing malformed statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CqlType {
    // String types
    Ascii,
    Text,
    Varchar,

    Boolean,

    // Fixed and floating point
    Decimal,
    Double,
    Float,

    // Integer types
    Counter,
    Bigint,
    Int,
    Varint,

    // Identifiers
    Timeuuid,
    Uuid,

    Timestamp,
    Blob,
    Inet,

    // Collections
    List,
    Set,
    Map,
}

impl CqlType {
    /// Get the dialect name of this kind.
    #[must_use]
    pub const fn cql_name(&self) -> &'static str {
        match self {
            CqlType::Ascii => "ascii",
            CqlType::Text => "text",
            CqlType::Varchar => "varchar",
            CqlType::Boolean => "boolean",
            CqlType::Decimal => "decimal",
            CqlType::Double => "double",
            CqlType::Float => "float",
            CqlType::Counter => "counter",
            CqlType::Bigint => "bigint",
            CqlType::Int => "int",
            CqlType::Varint => "varint",
            CqlType::Timeuuid => "timeuuid",
            CqlType::Uuid => "uuid",
            CqlType::Timestamp => "timestamp",
            CqlType::Blob => "blob",
            CqlType::Inet => "inet",
            CqlType::List => "list",
            CqlType::Set => "set",
            CqlType::Map => "map",
        }
    }
}

impl std::fmt::Display for CqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cql_name())
    }
}
