//! Rendering values as CQL literals.
//!
//! The statement builder interpolates values directly into statement text
//! (there is no bind-parameter path), so every value passes through
//! [`format_literal`]. Strings are the only kind that need escaping and get
//! quote doubling; all other supported kinds render to a character set that
//! cannot terminate a literal.
//!
//! | Kind | Literal |
//! |---|---|
//! | `ascii`, `text`, `varchar` | `'it''s'` |
//! | `boolean` | `true` / `false` |
//! | `decimal`, `double`, `float` | `1.500000E+000` |
//! | `counter`, `bigint`, `int`, `varint` | `-42` |
//! | `uuid`, `timeuuid` | `0b8d1c9e-...` (lowercase) |
//! | `timestamp` | milliseconds since the Unix epoch |
//! | `blob` | `0xabcd` |
//! | null | `null` |

use std::fmt::Write as _;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Error, Result, UnsupportedValueError};
use crate::identifiers::quote_string;
use crate::types::CqlType;
use crate::value::Value;

/// Significant digits in the scientific layout (one integer digit plus six
/// fraction digits).
const SIGNIFICANT_DIGITS: usize = 7;

/// Minimum number of exponent digits.
const EXPONENT_WIDTH: usize = 3;

const VARINT_PATTERN: &str = r"^-?[0-9]+$";

fn varint_regex() -> Option<&'static Regex> {
    static VARINT: OnceLock<Option<Regex>> = OnceLock::new();
    VARINT
        .get_or_init(|| match Regex::new(VARINT_PATTERN) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern = VARINT_PATTERN, error = %e, "Invalid varint pattern");
                None
            }
        })
        .as_ref()
}

/// Check if a string is a valid varint literal.
pub fn is_varint(digits: &str) -> bool {
    varint_regex().is_some_and(|regex| regex.is_match(digits))
}

/// Render a value as a CQL literal.
///
/// Fails with [`Error::UnsupportedValue`](crate::Error::UnsupportedValue)
/// for `inet` and collection values, and for a varint that is not a plain
/// base-10 integer.
pub fn format_literal(value: &Value) -> Result<String> {
    render(value, None)
}

/// Render the value of a named column as a CQL literal.
///
/// Identical to [`format_literal`] except that a failure names the column.
pub fn format_column_literal(column: &str, value: &Value) -> Result<String> {
    render(value, Some(column))
}

fn render(value: &Value, column: Option<&str>) -> Result<String> {
    let literal = match value {
        Value::Null => "null".to_string(),
        Value::Ascii(s) | Value::Text(s) | Value::Varchar(s) => quote_string(s),
        Value::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Decimal(d) => format_decimal(*d),
        Value::Double(f) => format_double(*f),
        Value::Float(f) => format_float(*f),
        Value::Counter(i) | Value::BigInt(i) => i.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Varint(digits) => {
            if !is_varint(digits) {
                return Err(UnsupportedValueError {
                    kind: CqlType::Varint,
                    column: column.map(str::to_string),
                    detail: Some(format!("'{digits}' is not a base-10 integer")),
                }
                .into());
            }
            digits.clone()
        }
        Value::TimeUuid(u) | Value::Uuid(u) => u.hyphenated().to_string(),
        Value::Timestamp(t) => format_timestamp(t),
        Value::Blob(bytes) => format_blob(bytes),
        Value::Inet(_) => return Err(unsupported(CqlType::Inet, column)),
        Value::List(_) => return Err(unsupported(CqlType::List, column)),
        Value::Set(_) => return Err(unsupported(CqlType::Set, column)),
        Value::Map(_) => return Err(unsupported(CqlType::Map, column)),
    };
    Ok(literal)
}

fn unsupported(kind: CqlType, column: Option<&str>) -> Error {
    Error::UnsupportedValue(UnsupportedValueError {
        kind,
        column: column.map(str::to_string),
        detail: None,
    })
}

fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.timestamp_millis().to_string()
}

fn format_blob(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for byte in bytes {
        let _ = write!(s, "{byte:02x}");
    }
    s
}

fn format_double(f: f64) -> String {
    if !f.is_finite() {
        return non_finite(f.is_nan(), f.is_sign_negative());
    }
    to_exponent_layout(&format!("{f:.6e}"))
}

fn format_float(f: f32) -> String {
    if !f.is_finite() {
        return non_finite(f.is_nan(), f.is_sign_negative());
    }
    to_exponent_layout(&format!("{f:.6e}"))
}

fn non_finite(nan: bool, negative: bool) -> String {
    if nan {
        "NaN"
    } else if negative {
        "-Infinity"
    } else {
        "Infinity"
    }
    .to_string()
}

/// Convert Rust's `1.500000e0` into `1.500000E+000`.
fn to_exponent_layout(rust: &str) -> String {
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust, "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    scientific(mantissa, exponent)
}

fn scientific(mantissa: &str, exponent: i64) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{mantissa}E{sign}{:0width$}",
        exponent.unsigned_abs(),
        width = EXPONENT_WIDTH
    )
}

/// Render a decimal with seven significant digits, rounding half away from
/// zero.
fn format_decimal(d: Decimal) -> String {
    let mantissa = d.mantissa();
    if mantissa == 0 {
        return scientific("0.000000", 0);
    }

    let digits = mantissa.unsigned_abs().to_string();
    let mut exponent = digits.len() as i64 - 1 - i64::from(d.scale());

    let mut kept: Vec<u8> = digits
        .bytes()
        .take(SIGNIFICANT_DIGITS)
        .map(|b| b - b'0')
        .collect();
    kept.resize(SIGNIFICANT_DIGITS, 0);

    let round_up = digits
        .as_bytes()
        .get(SIGNIFICANT_DIGITS)
        .is_some_and(|b| *b >= b'5');
    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept[0] = 1;
            exponent += 1;
        }
    }

    let mut body = String::with_capacity(SIGNIFICANT_DIGITS + 2);
    if d.is_sign_negative() {
        body.push('-');
    }
    body.push(char::from(b'0' + kept[0]));
    body.push('.');
    for digit in &kept[1..] {
        body.push(char::from(b'0' + digit));
    }
    scientific(&body, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::str::FromStr;
    use uuid::Uuid;

    fn lit(value: Value) -> String {
        format_literal(&value).unwrap()
    }

    #[test]
    fn test_strings_are_quoted() {
        assert_eq!(lit(Value::Text("hallo".into())), "'hallo'");
        assert_eq!(lit(Value::Ascii("O'Brien".into())), "'O''Brien'");
        assert_eq!(lit(Value::Varchar(String::new())), "''");
    }

    #[test]
    fn test_booleans() {
        assert_eq!(lit(Value::Boolean(true)), "true");
        assert_eq!(lit(Value::Boolean(false)), "false");
    }

    #[test]
    fn test_integers() {
        assert_eq!(lit(Value::Int(42)), "42");
        assert_eq!(lit(Value::Int(-7)), "-7");
        assert_eq!(lit(Value::BigInt(i64::MAX)), "9223372036854775807");
        assert_eq!(lit(Value::Counter(1_000_000)), "1000000");
    }

    #[test]
    fn test_varint() {
        assert_eq!(
            lit(Value::Varint("123456789012345678901234567890".into())),
            "123456789012345678901234567890"
        );
        assert_eq!(lit(Value::Varint("-5".into())), "-5");
    }

    #[test]
    fn test_malformed_varint_is_rejected() {
        let err = format_column_literal("n", &Value::Varint("1; DROP".into())).unwrap_err();
        match err {
            Error::UnsupportedValue(e) => {
                assert_eq!(e.kind, CqlType::Varint);
                assert_eq!(e.column.as_deref(), Some("n"));
                assert!(e.detail.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(format_literal(&Value::Varint("1_000".into())).is_err());
        assert!(format_literal(&Value::Varint(String::new())).is_err());
    }

    #[test]
    fn test_double_exponent_layout() {
        assert_eq!(lit(Value::Double(1.5)), "1.500000E+000");
        assert_eq!(lit(Value::Double(0.0)), "0.000000E+000");
        assert_eq!(lit(Value::Double(-1234.5678)), "-1.234568E+003");
        assert_eq!(lit(Value::Double(0.00012)), "1.200000E-004");
        assert_eq!(lit(Value::Double(1e300)), "1.000000E+300");
    }

    #[test]
    fn test_float_exponent_layout() {
        assert_eq!(lit(Value::Float(2.5)), "2.500000E+000");
        assert_eq!(lit(Value::Float(-100.0)), "-1.000000E+002");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(lit(Value::Double(f64::NAN)), "NaN");
        assert_eq!(lit(Value::Double(f64::INFINITY)), "Infinity");
        assert_eq!(lit(Value::Float(f32::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn test_decimal_exponent_layout() {
        let d = |s: &str| Value::Decimal(Decimal::from_str(s).unwrap());
        assert_eq!(lit(d("1.5")), "1.500000E+000");
        assert_eq!(lit(d("0")), "0.000000E+000");
        assert_eq!(lit(d("0.00")), "0.000000E+000");
        assert_eq!(lit(d("-42")), "-4.200000E+001");
        assert_eq!(lit(d("0.001")), "1.000000E-003");
        assert_eq!(lit(d("123456789")), "1.234568E+008");
    }

    #[test]
    fn test_decimal_rounds_half_away_from_zero() {
        let d = |s: &str| Value::Decimal(Decimal::from_str(s).unwrap());
        assert_eq!(lit(d("1.0000005")), "1.000001E+000");
        assert_eq!(lit(d("-1.0000005")), "-1.000001E+000");
        assert_eq!(lit(d("1.0000004")), "1.000000E+000");
        assert_eq!(lit(d("9.9999995")), "1.000000E+001");
    }

    #[test]
    fn test_uuid_is_lowercase_hyphenated() {
        let id = Uuid::parse_str("0B8D1C9E-3F4A-4B2C-9D1E-ABCDEF012345").unwrap();
        assert_eq!(lit(Value::Uuid(id)), "0b8d1c9e-3f4a-4b2c-9d1e-abcdef012345");
        assert_eq!(
            lit(Value::TimeUuid(id)),
            "0b8d1c9e-3f4a-4b2c-9d1e-abcdef012345"
        );
    }

    #[test]
    fn test_timestamp_is_epoch_millis() {
        let t = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(lit(Value::Timestamp(t)), "1700000000123");
        let before = DateTime::from_timestamp_millis(-1_000).unwrap();
        assert_eq!(lit(Value::Timestamp(before)), "-1000");
    }

    #[test]
    fn test_blob_is_lowercase_hex() {
        assert_eq!(lit(Value::Blob(vec![0xAB, 0xCD])), "0xabcd");
        assert_eq!(lit(Value::Blob(vec![0x00, 0x0f])), "0x000f");
        assert_eq!(lit(Value::Blob(vec![])), "0x");
    }

    #[test]
    fn test_null() {
        assert_eq!(lit(Value::Null), "null");
    }

    #[test]
    fn test_unsupported_kinds_fail() {
        let cases = [
            (Value::Inet(IpAddr::V4(Ipv4Addr::LOCALHOST)), CqlType::Inet),
            (Value::List(vec![Value::Int(1)]), CqlType::List),
            (Value::Set(vec![]), CqlType::Set),
            (Value::Map(vec![]), CqlType::Map),
        ];
        for (value, kind) in cases {
            match format_literal(&value) {
                Err(Error::UnsupportedValue(e)) => {
                    assert_eq!(e.kind, kind);
                    assert_eq!(e.column, None);
                }
                other => panic!("expected unsupported value, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_column_literal_names_column() {
        let err = format_column_literal("addr", &Value::Inet(IpAddr::V4(Ipv4Addr::LOCALHOST)))
            .unwrap_err();
        assert!(err.to_string().contains("'addr'"));
        assert!(err.to_string().contains("inet"));
    }
}
