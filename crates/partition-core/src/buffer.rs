//! Rope-backed reference text buffer.
//!
//! `TextBuffer` is the storage collaborator the engine is tested and
//! benchmarked against. It is deliberately small: line access on top of a
//! [`ropey::Rope`], plus edit operations that report the
//! [`DocumentChange`] a host must forward to its partitioner. Hosts with
//! their own storage only need to implement [`Document`].

use std::borrow::Cow;

use ropey::Rope;

use crate::document::{Document, DocumentChange};
use crate::position::{Position, Region};

/// Error returned by [`TextBuffer`] edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// A position lies outside the document (line out of range or offset
    /// past the end of its line).
    InvalidPosition {
        /// Logical line index.
        line: usize,
        /// Character offset within the line.
        offset: usize,
    },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::InvalidPosition { line, offset } => {
                write!(f, "Invalid position: line {}, offset {}", line, offset)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// A line-structured text buffer backed by a rope.
///
/// Line terminators are `'\n'`; an empty buffer has one empty line.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// The whole buffer as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total character count, terminators included.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Insert `text` at `at`, returning the change to forward to the
    /// partitioner. Inserting an empty string is a no-op change.
    pub fn insert(&mut self, at: Position, text: &str) -> Result<DocumentChange, EditError> {
        let char_idx = self.char_index(at)?;
        self.rope.insert(char_idx, text);
        Ok(DocumentChange::new(
            Region::empty_at(at),
            Region::new(at, inserted_end(at, text)),
        ))
    }

    /// Erase `region`, returning the change to forward to the partitioner.
    /// Erasing an empty region is a no-op change.
    pub fn erase(&mut self, region: Region) -> Result<DocumentChange, EditError> {
        let first = region.beginning();
        let last = region.end();
        let start = self.char_index(first)?;
        let end = self.char_index(last)?;
        self.rope.remove(start..end);
        Ok(DocumentChange::new(
            Region::new(first, last),
            Region::empty_at(first),
        ))
    }

    /// Replace `region` with `text` as a single change.
    pub fn replace(&mut self, region: Region, text: &str) -> Result<DocumentChange, EditError> {
        let first = region.beginning();
        let last = region.end();
        let start = self.char_index(first)?;
        let end = self.char_index(last)?;
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        Ok(DocumentChange::new(
            Region::new(first, last),
            Region::new(first, inserted_end(first, text)),
        ))
    }

    /// Character index of `at` in the underlying rope, validating bounds.
    fn char_index(&self, at: Position) -> Result<usize, EditError> {
        if at.line >= self.line_count() || at.offset > self.line_length(at.line) {
            return Err(EditError::InvalidPosition {
                line: at.line,
                offset: at.offset,
            });
        }
        Ok(self.rope.line_to_char(at.line) + at.offset)
    }
}

/// End position of `text` when inserted at `at`.
fn inserted_end(at: Position, text: &str) -> Position {
    let mut line = at.line;
    let mut offset = at.offset;
    for c in text.chars() {
        if c == '\n' {
            line += 1;
            offset = 0;
        } else {
            offset += 1;
        }
    }
    Position::new(line, offset)
}

impl Document for TextBuffer {
    fn region(&self) -> Region {
        let last = self.line_count() - 1;
        Region::new(Position::ZERO, Position::new(last, self.line_length(last)))
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_length(&self, line: usize) -> usize {
        let start = self.rope.line_to_char(line);
        if line + 1 < self.rope.len_lines() {
            // -1 for the terminator
            self.rope.line_to_char(line + 1) - start - 1
        } else {
            self.rope.len_chars() - start
        }
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Cow::Owned(text)
    }
}
