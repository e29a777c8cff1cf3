// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDF tokenizer
//!
//! `TYPE, field1, field2, ..., fieldN;` with `!` line comments. The tokenizer
//! is deliberately schema-blind: it only splits statements and fields and
//! leaves every interpretation to the typed views.

use nom::{
    bytes::complete::take_till, character::complete::char, multi::separated_list0, IResult,
};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Comment marker, runs to end of line
pub const COMMENT: u8 = b'!';
/// Statement terminator
pub const TERMINATOR: u8 = b';';
/// Field separator
pub const SEPARATOR: char = ',';

/// Remove `!` comments up to (not including) the end of each line
///
/// Returns the input unchanged (borrowed) when there is nothing to strip, so
/// the operation is idempotent and free on comment-free text.
pub fn strip_comments(content: &str) -> Cow<'_, str> {
    let bytes = content.as_bytes();
    if memchr::memchr(COMMENT, bytes).is_none() {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut pos = 0;

    while let Some(offset) = memchr::memchr(COMMENT, &bytes[pos..]) {
        let bang = pos + offset;
        out.push_str(&content[pos..bang]);

        // Resume at the newline so line structure survives
        match memchr::memchr(b'\n', &bytes[bang..]) {
            Some(nl) => pos = bang + nl,
            None => {
                pos = bytes.len();
                break;
            }
        }
    }
    out.push_str(&content[pos..]);

    Cow::Owned(out)
}

/// Parse one raw field: everything up to the next separator
fn field(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == SEPARATOR)(input)
}

/// Split a statement body into comma-separated fields
fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(SEPARATOR), field)(input)
}

/// Fields of one statement; most objects fit inline
pub type StatementFields<'a> = SmallVec<[&'a str; 16]>;

/// Split a single statement (without terminator) into trimmed fields
///
/// Returns `None` for whitespace-only statements.
pub fn parse_statement(statement: &str) -> Option<StatementFields<'_>> {
    let statement = statement.trim();
    if statement.is_empty() {
        return None;
    }

    match fields(statement) {
        Ok((_, raw)) => Some(raw.into_iter().map(str::trim).collect()),
        // `take_till` on complete input cannot fail; keep the whole text as one field
        Err(_) => Some(smallvec::smallvec![statement]),
    }
}

/// Iterator over `;`-terminated statements of comment-free text
///
/// The trailing chunk after the last terminator is yielded as well, matching
/// how an unterminated final object is tolerated.
pub struct StatementScanner<'a> {
    content: &'a str,
    position: usize,
    done: bool,
}

impl<'a> StatementScanner<'a> {
    /// Create a new scanner
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
            done: false,
        }
    }

    /// Reset scanner to beginning
    pub fn reset(&mut self) {
        self.position = 0;
        self.done = false;
    }
}

impl<'a> Iterator for StatementScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let remaining = &self.content.as_bytes()[self.position..];
        match memchr::memchr(TERMINATOR, remaining) {
            Some(offset) => {
                let start = self.position;
                let end = start + offset;
                self.position = end + 1;
                Some(&self.content[start..end])
            }
            None => {
                self.done = true;
                Some(&self.content[self.position..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        let text = "Zone, Z1; ! trailing\n!- full line\nLights, L1;";
        assert_eq!(strip_comments(text), "Zone, Z1; \n\nLights, L1;");
    }

    #[test]
    fn test_strip_comments_idempotent() {
        let text = "Zone,\n  Core,   !- Name\n  0;      !- Direction\n";
        let once = strip_comments(text).into_owned();
        let twice = strip_comments(&once).into_owned();
        assert_eq!(once, twice);
        assert!(matches!(strip_comments(&once), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_comment_without_newline() {
        assert_eq!(strip_comments("Zone, A; ! end"), "Zone, A; ");
    }

    #[test]
    fn test_parse_statement() {
        let fields = parse_statement("\n  ZONE, Z1, , ,1,,100 ").unwrap();
        assert_eq!(&fields[..], &["ZONE", "Z1", "", "", "1", "", "100"]);
        assert!(parse_statement("  \n\t ").is_none());
    }

    #[test]
    fn test_parse_statement_trailing_separator() {
        assert_eq!(&parse_statement("Version,").unwrap()[..], &["Version", ""]);
    }

    #[test]
    fn test_statement_scanner() {
        let statements: Vec<&str> = StatementScanner::new("A,1;B,2;  C").collect();
        assert_eq!(statements, vec!["A,1", "B,2", "  C"]);

        let mut scanner = StatementScanner::new("A;");
        assert_eq!(scanner.next(), Some("A"));
        assert_eq!(scanner.next(), Some(""));
        assert_eq!(scanner.next(), None);
        scanner.reset();
        assert_eq!(scanner.next(), Some("A"));
    }
}
