//! Compile-time recognition of constant expressions.
//!
//! Writers use [`classify`] to fold constant attribute values and
//! evaluations straight into the literal output instead of emitting a
//! runtime evaluation.

use crate::scanner::find_unescaped;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]*)?$").unwrap());

/// Returns the literal text of `expr` if it is a constant, `None` if it has
/// to be evaluated at runtime.
///
/// Recognized constants are unsigned decimal numerals (returned as-is) and
/// double-quoted strings without an unescaped `"` inside (returned without
/// the quotes, escapes untouched).
pub fn classify(expr: &str) -> Option<&str> {
    number(expr).or_else(|| string(expr))
}

fn number(expr: &str) -> Option<&str> {
    NUMBER.is_match(expr).then_some(expr)
}

fn string(expr: &str) -> Option<&str> {
    let inner = expr.strip_prefix('"')?.strip_suffix('"')?;
    if find_unescaped(inner, '"', 0).is_some() || ends_in_escape(inner) {
        return None;
    }
    Some(inner)
}

/// `"abc\"` is not a closed string: its last quote is escaped.
fn ends_in_escape(inner: &str) -> bool {
    inner.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(classify("42"), Some("42"));
        assert_eq!(classify("3.14"), Some("3.14"));
        assert_eq!(classify("7."), Some("7."));
        assert_eq!(classify("-1"), None);
        assert_eq!(classify(".5"), None);
        assert_eq!(classify("1e3"), None);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify(r#""abc""#), Some("abc"));
        assert_eq!(classify(r#""""#), Some(""));
        assert_eq!(classify(r#""say \"hi\"""#), Some(r#"say \"hi\""#));
        assert_eq!(classify(r#""a" + "b""#), None);
        assert_eq!(classify(r#""abc\""#), None);
        assert_eq!(classify("\""), None);
        assert_eq!(classify("'abc'"), None);
    }

    #[test]
    fn test_runtime_expressions() {
        assert_eq!(classify("x+1"), None);
        assert_eq!(classify("name"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify(" 42"), None);
    }
}
