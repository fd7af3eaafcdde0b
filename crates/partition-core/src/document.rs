//! The document interface the partitioning engine consumes.
//!
//! The engine does not own text storage. Anything that can report its
//! extent and hand out line text implements [`Document`]; the host drives
//! the engine by delivering [`DocumentChange`] notifications after each
//! edit, in order, one at a time.

use std::borrow::Cow;

use crate::position::Region;

/// Read access to line-structured text.
///
/// Offsets and lengths are character counts; line text excludes the line
/// terminator. An empty document has exactly one empty line.
pub trait Document {
    /// The span covering the whole document, from `(0, 0)` to the end of
    /// the last line.
    fn region(&self) -> Region;

    /// Number of logical lines (at least 1).
    fn line_count(&self) -> usize;

    /// Length of the given line in characters, terminator excluded.
    fn line_length(&self, line: usize) -> usize;

    /// Text of the given line, terminator excluded.
    fn line_text(&self, line: usize) -> Cow<'_, str>;
}

/// Description of a single document mutation: the region that was erased
/// (in pre-change coordinates) and the region that was inserted (in
/// post-change coordinates). Either may be empty; both empty means the
/// edit was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentChange {
    erased_region: Region,
    inserted_region: Region,
}

impl DocumentChange {
    /// Create a change notification. An empty region is anchored at the
    /// edit point so both regions always agree on where the edit happened.
    pub const fn new(erased_region: Region, inserted_region: Region) -> Self {
        Self {
            erased_region,
            inserted_region,
        }
    }

    /// The erased span, in coordinates of the document before the change.
    pub fn erased_region(&self) -> Region {
        self.erased_region
    }

    /// The inserted span, in coordinates of the document after the change.
    pub fn inserted_region(&self) -> Region {
        self.inserted_region
    }

    /// Returns `true` if the change neither erased nor inserted anything.
    pub fn is_noop(&self) -> bool {
        self.erased_region.is_empty() && self.inserted_region.is_empty()
    }
}
