//! Positions, regions, and the position transform applied across edits.
//!
//! All offsets are character offsets (Unicode scalar values), matching the
//! convention used by the rest of the workspace. What "end of line" means
//! for the offset bound is defined by the document, not by these types.

use crate::document::DocumentChange;

/// A location in a document: logical line index plus character offset
/// within that line.
///
/// Positions order by line first, then by offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Logical line index (0-based).
    pub line: usize,
    /// Character offset within the line (0-based, terminator excluded).
    pub offset: usize,
}

impl Position {
    /// Create a position from a line index and an in-line offset.
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// The beginning of the document, `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);

    /// The beginning of the given line.
    pub const fn bol(line: usize) -> Self {
        Self::new(line, 0)
    }
}

/// A span of document text given as an ordered pair of positions.
///
/// The pair is stored as given; [`Region::beginning`] and [`Region::end`]
/// return the two positions in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// First position of the pair.
    pub first: Position,
    /// Second position of the pair.
    pub second: Position,
}

impl Region {
    /// Create a region from two positions.
    pub const fn new(first: Position, second: Position) -> Self {
        Self { first, second }
    }

    /// Create an empty region anchored at `at`.
    pub const fn empty_at(at: Position) -> Self {
        Self::new(at, at)
    }

    /// The earlier of the two positions.
    pub fn beginning(&self) -> Position {
        self.first.min(self.second)
    }

    /// The later of the two positions.
    pub fn end(&self) -> Position {
        self.first.max(self.second)
    }

    /// Returns `true` if both positions coincide.
    pub fn is_empty(&self) -> bool {
        self.first == self.second
    }

    /// Returns `true` if `at` lies in `[beginning, end)`.
    pub fn contains(&self, at: Position) -> bool {
        self.beginning() <= at && at < self.end()
    }
}

/// Which way a stored position gives when an edit lands exactly on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The position moves with the inserted text.
    Forward,
    /// The position stays put in front of the inserted text.
    Backward,
}

/// Shift a stored position across a document change.
///
/// The erased region is applied first, then the inserted region. `gravity`
/// decides what happens when the position coincides with the insertion
/// point: [`Direction::Forward`] pushes it past the inserted text,
/// [`Direction::Backward`] leaves it in place.
pub fn update_position(position: Position, change: &DocumentChange, gravity: Direction) -> Position {
    let shifted = update_for_erase(position, change.erased_region());
    update_for_insert(shifted, change.inserted_region(), gravity)
}

/// Shift `position` across the erasure of `region` (positions inside the
/// erased span collapse onto its beginning).
pub(crate) fn update_for_erase(position: Position, region: Region) -> Position {
    if region.is_empty() {
        return position;
    }
    let first = region.beginning();
    let second = region.end();
    if position <= first {
        position
    } else if position <= second {
        // in the erased span
        first
    } else if position.line > second.line {
        Position::new(position.line - (second.line - first.line), position.offset)
    } else {
        // position.line == second.line and position.offset >= second.offset
        Position::new(first.line, first.offset + (position.offset - second.offset))
    }
}

/// Shift `position` across the insertion of `region`.
pub(crate) fn update_for_insert(position: Position, region: Region, gravity: Direction) -> Position {
    if region.is_empty() {
        return position;
    }
    let first = region.beginning();
    let second = region.end();
    if position < first || (position == first && gravity == Direction::Backward) {
        position
    } else if position.line > first.line {
        Position::new(position.line + (second.line - first.line), position.offset)
    } else {
        // position.line == first.line and position.offset >= first.offset
        Position::new(second.line, second.offset + (position.offset - first.offset))
    }
}
