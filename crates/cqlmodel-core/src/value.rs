//! Dynamic CQL values.

use crate::types::CqlType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

/// A dynamically-typed CQL value.
///
/// Each variant corresponds to one semantic kind ([`CqlType`]). Values are
/// snapshotted out of entities when a change is tracked and later rendered
/// as statement literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,

    /// US-ASCII string
    Ascii(String),

    /// UTF-8 string
    Text(String),

    /// UTF-8 string (alias of text in the dialect)
    Varchar(String),

    /// Boolean value
    Boolean(bool),

    /// Arbitrary precision decimal
    Decimal(Decimal),

    /// 64-bit floating point
    Double(f64),

    /// 32-bit floating point
    Float(f32),

    /// Distributed counter value
    Counter(i64),

    /// 64-bit signed integer
    BigInt(i64),

    /// 32-bit signed integer
    Int(i32),

    /// Arbitrary precision integer (base-10 digits, optional leading `-`)
    Varint(String),

    /// Version 1 (time-ordered) UUID
    TimeUuid(Uuid),

    /// UUID
    Uuid(Uuid),

    /// Timestamp with millisecond precision
    Timestamp(DateTime<Utc>),

    /// Binary data
    Blob(Vec<u8>),

    /// IP address
    Inet(IpAddr),

    /// Ordered collection
    List(Vec<Value>),

    /// Unique collection
    Set(Vec<Value>),

    /// Key/value collection
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Re-label this value as a sibling kind from the same storage family.
    ///
    /// Strings move between `ascii`, `text` and `varchar`; UUIDs between
    /// `uuid` and `timeuuid`; integers widen into `bigint`, `counter` and
    /// `varint`. Any other request returns the value unchanged, as does
    /// [`Value::Null`].
    #[must_use]
    pub fn refine(self, kind: CqlType) -> Self {
        match (self, kind) {
            (Value::Ascii(s) | Value::Text(s) | Value::Varchar(s), CqlType::Ascii) => {
                Value::Ascii(s)
            }
            (Value::Ascii(s) | Value::Text(s) | Value::Varchar(s), CqlType::Text) => {
                Value::Text(s)
            }
            (Value::Ascii(s) | Value::Text(s) | Value::Varchar(s), CqlType::Varchar) => {
                Value::Varchar(s)
            }
            (Value::Uuid(u) | Value::TimeUuid(u), CqlType::Uuid) => Value::Uuid(u),
            (Value::Uuid(u) | Value::TimeUuid(u), CqlType::Timeuuid) => Value::TimeUuid(u),
            (Value::BigInt(v) | Value::Counter(v), CqlType::Bigint) => Value::BigInt(v),
            (Value::BigInt(v) | Value::Counter(v), CqlType::Counter) => Value::Counter(v),
            (Value::BigInt(v) | Value::Counter(v), CqlType::Varint) => {
                Value::Varint(v.to_string())
            }
            (Value::Int(v), CqlType::Bigint) => Value::BigInt(i64::from(v)),
            (Value::Int(v), CqlType::Counter) => Value::Counter(i64::from(v)),
            (Value::Int(v), CqlType::Varint) => Value::Varint(v.to_string()),
            (Value::Float(v), CqlType::Double) => Value::Double(f64::from(v)),
            (value, _) => value,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<IpAddr> for Value {
    fn from(v: IpAddr) -> Self {
        Value::Inet(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(42_i32), Value::Int(42));
        assert_eq!(Value::from(42_i64), Value::BigInt(42));
        assert_eq!(Value::from(1.5_f32), Value::Float(1.5));
        assert_eq!(Value::from(1.5_f64), Value::Double(1.5));
        assert_eq!(Value::from("hallo"), Value::Text("hallo".to_string()));
    }

    #[test]
    fn test_from_bytes_is_blob() {
        assert_eq!(Value::from(vec![0xAB_u8, 0xCD]), Value::Blob(vec![0xAB, 0xCD]));
        assert_eq!(Value::from(&[1_u8][..]), Value::Blob(vec![1]));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(7_i32)), Value::Int(7));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_refine_string_family() {
        let v = Value::Text("abc".to_string());
        assert_eq!(v.clone().refine(CqlType::Ascii), Value::Ascii("abc".to_string()));
        assert_eq!(v.refine(CqlType::Varchar), Value::Varchar("abc".to_string()));
    }

    #[test]
    fn test_refine_numeric_family() {
        assert_eq!(Value::BigInt(5).refine(CqlType::Counter), Value::Counter(5));
        assert_eq!(Value::Int(5).refine(CqlType::Bigint), Value::BigInt(5));
        assert_eq!(
            Value::BigInt(-12).refine(CqlType::Varint),
            Value::Varint("-12".to_string())
        );
    }

    #[test]
    fn test_refine_uuid_family() {
        let id = Uuid::nil();
        assert_eq!(Value::Uuid(id).refine(CqlType::Timeuuid), Value::TimeUuid(id));
    }

    #[test]
    fn test_refine_incompatible_is_unchanged() {
        assert_eq!(Value::Boolean(true).refine(CqlType::Int), Value::Boolean(true));
        assert_eq!(Value::Null.refine(CqlType::Ascii), Value::Null);
    }

    #[test]
    fn test_serde_round_trip() {
        let v = Value::Map(vec![(Value::Int(1), Value::Text("a".to_string()))]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
