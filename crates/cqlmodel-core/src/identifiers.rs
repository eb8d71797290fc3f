//! CQL identifier and string quoting.
//!
//! Table and column names are always emitted as quoted identifiers so that
//! mixed-case names and reserved words survive the round trip to the
//! backend unchanged.

/// Quote a CQL identifier using double quotes.
///
/// Embedded double-quotes are escaped by doubling them (`"` → `""`).
///
/// # Examples
///
/// ```
/// use cqlmodel_core::quote_ident;
///
/// assert_eq!(quote_ident("users"), "\"users\"");
/// assert_eq!(quote_ident("UserId"), "\"UserId\"");
/// assert_eq!(quote_ident("user\"name"), "\"user\"\"name\"");
/// ```
#[inline]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string as a CQL string literal.
///
/// Embedded single quotes are doubled (`'` → `''`). No other character is
/// escaped.
///
/// # Examples
///
/// ```
/// use cqlmodel_core::quote_string;
///
/// assert_eq!(quote_string("hallo"), "'hallo'");
/// assert_eq!(quote_string("o'neil"), "'o''neil'");
/// ```
#[inline]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_simple() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn test_quote_ident_empty() {
        assert_eq!(quote_ident(""), "\"\"");
    }

    #[test]
    fn test_quote_ident_preserves_case() {
        assert_eq!(quote_ident("TestTable"), "\"TestTable\"");
    }

    #[test]
    fn test_quote_ident_embedded_double_quote() {
        assert_eq!(quote_ident("a\"b\"c"), "\"a\"\"b\"\"c\"");
    }

    #[test]
    fn test_quote_ident_keyword() {
        assert_eq!(quote_ident("select"), "\"select\"");
        assert_eq!(quote_ident("token"), "\"token\"");
    }

    #[test]
    fn test_quote_ident_injection_attempt() {
        let malicious = "t\"; DROP TABLE users; --";
        let quoted = quote_ident(malicious);
        assert_eq!(quoted, "\"t\"\"; DROP TABLE users; --\"");
        let inner = &quoted[1..quoted.len() - 1];
        assert!(!inner.replace("\"\"", "").contains('"'));
    }

    #[test]
    fn test_quote_string_simple() {
        assert_eq!(quote_string("hallo"), "'hallo'");
    }

    #[test]
    fn test_quote_string_empty() {
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn test_quote_string_doubles_quotes() {
        assert_eq!(quote_string("''"), "''''''");
        assert_eq!(quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_quote_string_leaves_other_chars() {
        assert_eq!(quote_string("a\"b\\c\n"), "'a\"b\\c\n'");
        assert_eq!(quote_string("naïve"), "'naïve'");
    }
}
