//! The partition table: a sorted run of partition records.
//!
//! The table owns every [`Partition`] record exclusively and keeps them
//! ordered by start position. Lookups are a binary search over the sorted
//! vector; splices are contiguous vector edits. Two adjacent records may
//! share a start position only transiently while the repartitioner is
//! rebuilding a span; callers of the public engine API never observe that
//! state.

use crate::content_type::ContentType;
use crate::document::Document;
use crate::position::Position;

/// One contiguous content-type region.
///
/// `start` is the reported boundary of the region. `token_start` and
/// `token_length` record the token whose rule produced the boundary;
/// later edits are matched against the token span to decide whether the
/// cached boundary is still trustworthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Partition {
    pub content_type: ContentType,
    pub start: Position,
    pub token_start: Position,
    pub token_length: usize,
}

impl Partition {
    pub fn new(
        content_type: ContentType,
        start: Position,
        token_start: Position,
        token_length: usize,
    ) -> Self {
        Self {
            content_type,
            start,
            token_start,
            token_length,
        }
    }

    /// End of the token that produced this partition (tokens never span
    /// lines).
    pub fn token_end(&self) -> Position {
        Position::new(self.token_start.line, self.token_start.offset + self.token_length)
    }
}

/// Ordered sequence of partitions covering the whole document.
#[derive(Debug, Default)]
pub(crate) struct PartitionTable {
    pub partitions: Vec<Partition>,
}

impl PartitionTable {
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }

    /// Drop everything and seed the single default partition at `bob`
    /// (beginning of the bound document).
    pub fn reset(&mut self, bob: Position) {
        self.partitions.clear();
        self.partitions
            .push(Partition::new(ContentType::DEFAULT, bob, bob, 0));
    }

    pub fn clear(&mut self) {
        self.partitions.clear();
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Index of the partition whose span contains `at`.
    ///
    /// Edge rules: if `at` sits exactly on a partition's token start at
    /// end of line, the previous partition is preferred (the boundary
    /// belongs to the line it ends). If several consecutive partitions
    /// share a start (transient state during splices), the last of them
    /// wins.
    pub fn index_at(&self, at: Position, doc: &impl Document) -> usize {
        let idx = self.partitions.partition_point(|p| p.start <= at);
        if idx == 0 {
            // only reachable while the leading partition is being rebuilt
            return 0;
        }
        let mut i = idx - 1;
        if i > 0
            && at.line < doc.line_count()
            && self.partitions[i].token_start == at
            && at.offset == doc.line_length(at.line)
        {
            i -= 1;
        }
        while i + 1 < self.partitions.len() && self.partitions[i + 1].start == self.partitions[i].start
        {
            i += 1;
        }
        i
    }

    /// Index of the last partition whose start is at or before `at`, with
    /// none of the end-of-line preferences of [`PartitionTable::index_at`].
    ///
    /// This is the lookup for seeding the scanner from the end of the
    /// previous line: a zero-width partition sitting exactly on `at` (a
    /// transition that fired at end of line) governs from `at` onward and
    /// must win here.
    pub fn index_at_or_before(&self, at: Position) -> usize {
        self.partitions
            .partition_point(|p| p.start <= at)
            .saturating_sub(1)
    }

    /// Remove or merge every partition lying wholly or partly inside
    /// `[first, last]`, then restore the leading-default invariant and
    /// drop a trailing partition that starts at the document end.
    pub fn erase_partitions(&mut self, first: Position, last: Position, doc: &impl Document) {
        // locate the first partition to delete
        let mut deleted_first = self.index_at(first, doc);
        if first >= self.partitions[deleted_first].token_end() {
            deleted_first += 1; // its token survives in front of the span
        }
        // locate the end of the deleted run (exclusive)
        let mut deleted_last = self.index_at(last, doc) + 1;
        if deleted_last < self.partitions.len()
            && self.partitions[deleted_last].token_start < last
        {
            deleted_last += 1;
        }
        if deleted_last > deleted_first {
            if deleted_first > 0
                && deleted_last < self.partitions.len()
                && self.partitions[deleted_first - 1].content_type
                    == self.partitions[deleted_last].content_type
            {
                // the neighbours would now touch with equal content types
                deleted_last += 1;
            }
            self.partitions.drain(deleted_first..deleted_last);
        }

        // keep a default partition anchored at the document beginning
        let bob = doc.region().beginning();
        if self.partitions.first().map(|p| p.start) != Some(bob) {
            if self
                .partitions
                .first()
                .map(|p| p.content_type != ContentType::DEFAULT)
                .unwrap_or(true)
            {
                self.partitions
                    .insert(0, Partition::new(ContentType::DEFAULT, bob, bob, 0));
            } else {
                let p = &mut self.partitions[0];
                p.start = bob;
                p.token_start = bob;
                p.token_length = 0;
            }
        }

        // a partition starting exactly at the document end covers nothing
        let eod = doc.region().end();
        if self.partitions.len() > 1
            && self.partitions[self.partitions.len() - 1].start == eod
        {
            self.partitions.pop();
        }
    }

    /// Splice a freshly tokenized run behind the partition at `index`.
    pub fn insert_after(&mut self, index: usize, run: Vec<Partition>) {
        self.partitions.splice(index + 1..index + 1, run);
    }

    /// Debug-only invariant walk: non-empty, anchored at the document
    /// beginning, strictly ordered starts (a single shared start is
    /// tolerated per pair, never doubled), alternating content types.
    /// No-op in release builds.
    pub fn verify(&self, doc: &impl Document) {
        if !cfg!(debug_assertions) {
            return;
        }
        assert!(!self.partitions.is_empty(), "partition table is empty");
        assert_eq!(
            self.partitions[0].start,
            doc.region().beginning(),
            "first partition is not anchored at the document beginning"
        );
        let mut previous_was_empty = false;
        for pair in self.partitions.windows(2) {
            assert_ne!(
                pair[0].content_type, pair[1].content_type,
                "adjacent partitions share a content type"
            );
            if pair[0].start == pair[1].start {
                assert!(!previous_was_empty, "doubled zero-width partition");
                previous_was_empty = true;
            } else {
                assert!(pair[0].start < pair[1].start, "partition starts out of order");
                previous_was_empty = false;
            }
        }
    }

    /// Trace the table contents through the `log` facade.
    pub fn dump(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("partition table ({} partitions):", self.partitions.len());
        for p in &self.partitions {
            log::trace!(
                "  {:?} @ ({}, {}) token ({}, {})+{}",
                p.content_type,
                p.start.line,
                p.start.offset,
                p.token_start.line,
                p.token_start.offset,
                p.token_length
            );
        }
    }
}
