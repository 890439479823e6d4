//! `an+b` argument parsing.
//!
//! [§ 6.6.5.2 :nth-child()](https://www.w3.org/TR/selectors-3/#nth-child-pseudo)
//!
//! ```text
//! nth : S* [ ['-'|'+']? INTEGER? {N} [ S* ['-'|'+'] S* INTEGER ]? |
//!            ['-'|'+']? INTEGER | {O}{D}{D} | {E}{V}{E}{N} ] S*
//! ```

use super::ast::Nth;
use crate::error::{SelectorError, SyntaxErrorKind};

/// Parse the raw argument text of an `nth-*` pseudo-class.
///
/// `offset` is the byte offset of `raw` in the selector source and is used
/// for error reporting.
///
/// # Errors
///
/// Returns [`SyntaxErrorKind::MalformedNth`] if `raw` is not of the form
/// `an+b`, `odd` or `even`, or if a number does not fit in an `i32`.
pub fn parse_nth(raw: &str, offset: usize) -> Result<Nth, SelectorError> {
    let malformed = || SelectorError::syntax(SyntaxErrorKind::MalformedNth(raw.to_string()), offset);
    let text = raw.trim_matches(is_whitespace).to_ascii_lowercase();

    match text.as_str() {
        // "'odd' has the same signification as 2n+1"
        "odd" => return Ok(Nth::new(2, 1)),
        // "'even' has the same signification as 2n"
        "even" => return Ok(Nth::new(2, 0)),
        _ => {}
    }

    let (negative, rest) = split_sign(&text);
    let (digits, rest) = split_digits(rest);

    let Some(rest) = rest.strip_prefix('n') else {
        // A lone integer: the element at exactly that position.
        if digits.is_empty() || !rest.is_empty() {
            return Err(malformed());
        }
        let b = parse_signed(negative, digits).ok_or_else(malformed)?;
        return Ok(Nth::new(0, b));
    };

    // "When a=1, or a=-1, the number may be omitted from the rule."
    let a = if digits.is_empty() {
        if negative { -1 } else { 1 }
    } else {
        parse_signed(negative, digits).ok_or_else(malformed)?
    };

    let rest = rest.trim_start_matches(is_whitespace);
    if rest.is_empty() {
        return Ok(Nth::new(a, 0));
    }

    // The sign of b is mandatory here and may be surrounded by whitespace.
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'+') => (false, &rest[1..]),
        Some(b'-') => (true, &rest[1..]),
        _ => return Err(malformed()),
    };
    let (digits, rest) = split_digits(rest.trim_start_matches(is_whitespace));
    if digits.is_empty() || !rest.is_empty() {
        return Err(malformed());
    }
    let b = parse_signed(negative, digits).ok_or_else(malformed)?;
    Ok(Nth::new(a, b))
}

fn split_sign(text: &str) -> (bool, &str) {
    text.strip_prefix('-').map_or_else(
        || (false, text.strip_prefix('+').unwrap_or(text)),
        |rest| (true, rest),
    )
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    text.split_at(end)
}

fn parse_signed(negative: bool, digits: &str) -> Option<i32> {
    let value: i64 = digits.parse().ok()?;
    i32::try_from(if negative { -value } else { value }).ok()
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth(raw: &str) -> (i32, i32) {
        let parsed = parse_nth(raw, 0).unwrap();
        (parsed.a, parsed.b)
    }

    #[test]
    fn test_keywords() {
        assert_eq!(nth("odd"), (2, 1));
        assert_eq!(nth(" EVEN "), (2, 0));
    }

    #[test]
    fn test_full_forms() {
        assert_eq!(nth("2n+1"), (2, 1));
        assert_eq!(nth("-n+3"), (-1, 3));
        assert_eq!(nth("+n"), (1, 0));
        assert_eq!(nth("3n - 2"), (3, -2));
        assert_eq!(nth("0n+5"), (0, 5));
        assert_eq!(nth("-2"), (0, -2));
        assert_eq!(nth("7"), (0, 7));
    }

    #[test]
    fn test_malformed() {
        for raw in ["", "n+", "2n+-1", "2 n", "+ 2n", "3x", "n1", "1.5", "99999999999n"] {
            assert!(parse_nth(raw, 4).is_err(), "expected {raw:?} to be rejected");
        }
        assert_eq!(parse_nth("bogus", 12).unwrap_err().offset(), 12);
    }

    #[test]
    fn test_matches_positions() {
        let odd = Nth::new(2, 1);
        assert!(odd.matches(1) && odd.matches(3) && !odd.matches(2));

        // -n+3 selects the first three.
        let first_three = Nth::new(-1, 3);
        assert!((1..=3).all(|p| first_three.matches(p)));
        assert!(!first_three.matches(4));

        // Offsets beyond the range never match for a = 0.
        assert!(!Nth::new(0, -1).matches(1));
        assert!(Nth::new(0, 2).matches(2));
    }
}
