#![warn(missing_docs)]
//! `partition-core-rules` - literal and regex [`TransitionRule`]
//! implementations for `partition-core`.
//!
//! Most partitioning grammars are built from a handful of delimiter
//! tokens: `/*` enters a block comment, `*/` leaves it, `"` toggles a
//! string, `//` runs to end of line. [`LiteralTransitionRule`] covers
//! those, including the two idioms that make them work in practice: an
//! escape character that suppresses a match (`\"` inside a string) and an
//! empty pattern that matches exactly at end of line (how a single-line
//! comment ends). [`RegexTransitionRule`] handles the rest via the
//! `regex` crate, anchored at the scan offset.

use partition_core::{ContentType, TransitionRule};
use regex::Regex;

/// A transition rule matching a literal token.
#[derive(Debug, Clone)]
pub struct LiteralTransitionRule {
    source: ContentType,
    destination: ContentType,
    pattern: Vec<char>,
    escape: Option<char>,
    case_sensitive: bool,
}

impl LiteralTransitionRule {
    /// Create a rule that fires when `pattern` occurs at the scan offset
    /// while `source` is in effect. An empty pattern matches exactly at
    /// end of line, as a zero-width transition.
    pub fn new(
        source: ContentType,
        destination: ContentType,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            pattern: pattern.into().chars().collect(),
            escape: None,
            case_sensitive: true,
        }
    }

    /// Suppress the match when the character before the scan offset is
    /// `escape` (e.g. `\"` inside a string literal).
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Compare the pattern caselessly.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    fn chars_equal(&self, a: char, b: char) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase().eq(b.to_lowercase())
        }
    }
}

impl TransitionRule for LiteralTransitionRule {
    fn source(&self) -> ContentType {
        self.source
    }

    fn destination(&self) -> ContentType {
        self.destination
    }

    fn matches(&self, line: &str, offset: usize) -> Option<usize> {
        let mut chars = line.chars();
        if let Some(escape) = self.escape {
            if offset > 0 && line.chars().nth(offset - 1) == Some(escape) {
                return None;
            }
        }
        // position the iterator at the scan offset
        for _ in 0..offset {
            chars.next()?;
        }
        if self.pattern.is_empty() {
            // empty pattern matches end of line only
            return chars.next().is_none().then_some(0);
        }
        for &expected in &self.pattern {
            let got = chars.next()?;
            if !self.chars_equal(expected, got) {
                return None;
            }
        }
        Some(self.pattern.len())
    }
}

/// A transition rule matching a regular expression anchored at the scan
/// offset.
#[derive(Debug, Clone)]
pub struct RegexTransitionRule {
    source: ContentType,
    destination: ContentType,
    pattern: Regex,
}

impl RegexTransitionRule {
    /// Compile `pattern` into a rule firing from `source`. The match must
    /// begin exactly at the scan offset; a leading `^` is unnecessary.
    pub fn new(
        source: ContentType,
        destination: ContentType,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            source,
            destination,
            pattern: Regex::new(pattern)?,
        })
    }
}

impl TransitionRule for RegexTransitionRule {
    fn source(&self) -> ContentType {
        self.source
    }

    fn destination(&self) -> ContentType {
        self.destination
    }

    fn matches(&self, line: &str, offset: usize) -> Option<usize> {
        let byte_offset = char_to_byte(line, offset)?;
        let m = self.pattern.find_at(line, byte_offset)?;
        if m.start() != byte_offset {
            return None;
        }
        Some(line[m.start()..m.end()].chars().count())
    }
}

/// Byte index of the `offset`th character of `line`; `line.len()` when
/// `offset` is the end-of-line position.
fn char_to_byte(line: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return Some(0);
    }
    let mut count = 0;
    for (idx, _) in line.char_indices() {
        if count == offset {
            return Some(idx);
        }
        count += 1;
    }
    (count == offset).then_some(line.len())
}
