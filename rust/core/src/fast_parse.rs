// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast numeric field parsing
//!
//! IDF fields are plain text. These helpers turn them into numbers with
//! fast-float / lexical-core and never panic: anything that does not parse
//! cleanly is reported as `None` and the caller skips the contribution.

/// Check if byte is a digit, sign, or decimal point (start of number)
#[inline(always)]
fn is_number_start(b: u8) -> bool {
    b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.'
}

/// Whether a field holds the `autocalculate` sentinel (either spelling)
#[inline]
pub fn is_autocalculate(field: &str) -> bool {
    let field = field.trim();
    field.eq_ignore_ascii_case("autocalculate") || field.eq_ignore_ascii_case("auto-calculate")
}

/// Parse a whole field as `f64`
///
/// Blank fields and fields with trailing garbage return `None`.
#[inline]
pub fn parse_f64(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    fast_float::parse::<f64, _>(field).ok()
}

/// Parse a whole field as a non-negative integer (vertex counts and the like)
#[inline]
pub fn parse_count(field: &str) -> Option<usize> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    lexical_core::parse::<usize>(field.as_bytes()).ok()
}

/// Parse a declared quantity that may be left for the engine to compute
///
/// Blank and `autocalculate` both mean "unset" and return `None`, as does
/// anything unparsable.
#[inline]
pub fn parse_declared(field: &str) -> Option<f64> {
    if is_autocalculate(field) {
        return None;
    }
    parse_f64(field)
}

/// Extract the first number embedded in free text
///
/// Used for compact-schedule data fields such as `24.0` or `Until: 07:00,15.6`
/// where only the leading numeric token matters.
pub fn first_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        while pos < len && !is_number_start(bytes[pos]) {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        // A lone sign or dot only starts a number if a digit follows it
        let mut probe = pos;
        while probe < len && matches!(bytes[probe], b'-' | b'+' | b'.') {
            probe += 1;
        }
        if probe >= len || !bytes[probe].is_ascii_digit() {
            pos = probe.max(pos + 1);
            continue;
        }

        match fast_float::parse_partial::<f64, _>(&bytes[pos..]) {
            Ok((value, consumed)) if consumed > 0 => return Some(value),
            _ => pos += 1,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("1.5"), Some(1.5));
        assert_eq!(parse_f64("  -2 "), Some(-2.0));
        assert_eq!(parse_f64("1e-3"), Some(0.001));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("abc"), None);
        assert_eq!(parse_f64("1.5x"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), Some(4));
        assert_eq!(parse_count(" 12 "), Some(12));
        assert_eq!(parse_count("4.0"), None);
        assert_eq!(parse_count("autocalculate"), None);
    }

    #[test]
    fn test_autocalculate() {
        assert!(is_autocalculate("autocalculate"));
        assert!(is_autocalculate("AutoCalculate"));
        assert!(is_autocalculate("auto-calculate"));
        assert!(!is_autocalculate("12.0"));
        assert_eq!(parse_declared("AUTOCALCULATE"), None);
        assert_eq!(parse_declared(""), None);
        assert_eq!(parse_declared("250"), Some(250.0));
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("24.0"), Some(24.0));
        assert_eq!(first_number("value -3.5 here"), Some(-3.5));
        assert_eq!(first_number(".5"), Some(0.5));
        assert_eq!(first_number("no digits"), None);
        assert_eq!(first_number("- ."), None);
    }
}
