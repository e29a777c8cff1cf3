// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered rule tables
//!
//! Keyword decisions (boundary-condition vocabularies, input-method
//! spellings, equipment-type classification) are declared as ordered
//! `(pattern, outcome)` lists and evaluated by one matcher. Precedence is the
//! order of the table. All comparisons ignore ASCII case.

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Case-insensitive string pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Whole value equals the pattern
    Exact(Cow<'static, str>),
    /// Value starts with the pattern
    Prefix(Cow<'static, str>),
    /// Pattern occurs anywhere in the value
    Contains(Cow<'static, str>),
}

impl Pattern {
    pub fn exact(text: impl Into<Cow<'static, str>>) -> Self {
        Pattern::Exact(text.into())
    }

    pub fn prefix(text: impl Into<Cow<'static, str>>) -> Self {
        Pattern::Prefix(text.into())
    }

    pub fn contains(text: impl Into<Cow<'static, str>>) -> Self {
        Pattern::Contains(text.into())
    }

    /// Test a value against this pattern
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Exact(p) => value.eq_ignore_ascii_case(p),
            Pattern::Prefix(p) => starts_with_ignore_case(value, p),
            Pattern::Contains(p) => contains_ignore_case(value, p),
        }
    }
}

/// A single `(pattern, outcome)` entry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule<T> {
    pub pattern: Pattern,
    pub outcome: T,
}

/// Ordered list of rules, first match wins
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleTable<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleTable<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule (builder style)
    pub fn with(mut self, pattern: Pattern, outcome: T) -> Self {
        self.push(pattern, outcome);
        self
    }

    pub fn push(&mut self, pattern: Pattern, outcome: T) {
        self.rules.push(Rule { pattern, outcome });
    }

    /// Outcome of the first rule whose pattern matches `value`
    #[inline]
    pub fn first_match(&self, value: &str) -> Option<&T> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(value))
            .map(|rule| &rule.outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleTable<()> {
    /// Build a membership table: any matching pattern is a hit
    pub fn vocabulary(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        let mut table = Self::new();
        for pattern in patterns {
            table.push(pattern, ());
        }
        table
    }

    #[inline]
    pub fn matches_any(&self, value: &str) -> bool {
        self.first_match(value).is_some()
    }
}

impl<T> Default for RuleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII case-insensitive `starts_with`
#[inline]
pub fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    let (value, prefix) = (value.as_bytes(), prefix.as_bytes());
    value.len() >= prefix.len() && value[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// ASCII case-insensitive `ends_with`
#[inline]
pub fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    let (value, suffix) = (value.as_bytes(), suffix.as_bytes());
    value.len() >= suffix.len() && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// ASCII case-insensitive substring test
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let (haystack, needle) = (haystack.as_bytes(), needle.as_bytes());
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Packaged,
        Terminal,
    }

    #[test]
    fn test_first_match_respects_order() {
        let table = RuleTable::new()
            .with(Pattern::contains("PACKAGEDTERMINAL"), Kind::Packaged)
            .with(Pattern::contains("TERMINAL"), Kind::Terminal);

        assert_eq!(
            table.first_match("ZoneHVAC:PackagedTerminalAirConditioner"),
            Some(&Kind::Packaged)
        );
        assert_eq!(
            table.first_match("AirTerminal:SingleDuct:VAV:Reheat"),
            Some(&Kind::Terminal)
        );
        assert_eq!(table.first_match("Fan:OnOff"), None);
    }

    #[test]
    fn test_pattern_kinds() {
        assert!(Pattern::exact("outdoors").matches("OUTDOORS"));
        assert!(!Pattern::exact("outdoors").matches("outdoors2"));
        assert!(Pattern::prefix("ZONEHVAC:").matches("ZoneHVAC:Baseboard"));
        assert!(!Pattern::prefix("ZONEHVAC:").matches("AirTerminal:ZoneHVAC:"));
        assert!(Pattern::contains("vav").matches("Core VAV Box"));
    }

    #[test]
    fn test_vocabulary() {
        let vocab = RuleTable::vocabulary([Pattern::exact("ground"), Pattern::exact("surface")]);
        assert!(vocab.matches_any("Ground"));
        assert!(!vocab.matches_any("Space 1"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_case_helpers() {
        assert!(ends_with_ignore_case("Bedroom_Unit12", "_UNIT12"));
        assert!(!ends_with_ignore_case("x", "longer"));
        assert!(contains_ignore_case("abc", ""));
        assert!(!contains_ignore_case("ab", "abc"));
    }
}
