//! The incremental repartitioner.
//!
//! `Partitioner` reconciles the partition table against document edits in
//! a single synchronous pass: shift surviving partitions across the edit,
//! re-tokenize the smallest span that can have changed, splice the fresh
//! run back in, and report one net changed region. The pass runs entirely
//! inside the host's change notification; it performs no I/O and is not
//! reentrant (the document must serialize its notifications).

use crate::buffer::{EditError, TextBuffer};
use crate::content_type::ContentType;
use crate::document::{Document, DocumentChange};
use crate::position::{self, Position, Region};
use crate::rules::TransitionRuleSet;
use crate::table::{Partition, PartitionTable};

/// A partition as reported to consumers: the governing content type and
/// the region it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPartition {
    /// Content type governing the region.
    pub content_type: ContentType,
    /// Span of the partition, `[start, next partition's start)`.
    pub region: Region,
}

type ChangeListener = Box<dyn FnMut(Region)>;

/// Incremental lexical partitioner bound to one document at a time.
///
/// Attach with [`Partitioner::install`], feed every edit through
/// [`Partitioner::document_changed`], and query with
/// [`Partitioner::partition_at`].
pub struct Partitioner {
    rules: TransitionRuleSet,
    table: PartitionTable,
    listener: Option<ChangeListener>,
}

impl Partitioner {
    /// Create a partitioner over the given rule set.
    pub fn new(rules: TransitionRuleSet) -> Self {
        Self {
            rules,
            table: PartitionTable::new(),
            listener: None,
        }
    }

    /// Register the callback fired once per repartitioning pass with the
    /// net changed region. Replaces any previous listener.
    pub fn set_listener(&mut self, listener: impl FnMut(Region) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the change listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Bind to a document: the table collapses to a single default
    /// partition, then a full scan partitions any existing text.
    pub fn install(&mut self, doc: &impl Document) {
        self.table.reset(doc.region().beginning());
        if !doc.region().is_empty() {
            let whole = DocumentChange::new(
                Region::empty_at(doc.region().beginning()),
                doc.region(),
            );
            self.document_changed(doc, &whole);
        }
    }

    /// Detach from the document, releasing the table.
    pub fn uninstall(&mut self) {
        self.table.clear();
    }

    /// Returns `true` while bound to a document.
    pub fn is_installed(&self) -> bool {
        !self.table.is_empty()
    }

    /// The partition governing `at`: its content type and span.
    pub fn partition_at(&self, doc: &impl Document, at: Position) -> DocumentPartition {
        let i = self.table.index_at(at, doc);
        let p = &self.table.partitions[i];
        let end = if i + 1 < self.table.len() {
            self.table.partitions[i + 1].start
        } else {
            doc.region().end()
        };
        DocumentPartition {
            content_type: p.content_type,
            region: Region::new(p.start, end),
        }
    }

    /// The content type governing `at`.
    pub fn content_type_at(&self, doc: &impl Document, at: Position) -> ContentType {
        self.partition_at(doc, at).content_type
    }

    /// Snapshot of every partition in document order.
    ///
    /// Zero-width bookkeeping records (the anchor in front of a partition
    /// opening at the document start, or a transition sitting exactly on
    /// the document end) span no text and are not reported, same as
    /// [`Partitioner::partition_at`] never answers with them.
    pub fn partitions(&self, doc: &impl Document) -> Vec<DocumentPartition> {
        let mut out = Vec::with_capacity(self.table.len());
        for i in 0..self.table.len() {
            let p = &self.table.partitions[i];
            let end = if i + 1 < self.table.len() {
                self.table.partitions[i + 1].start
            } else {
                doc.region().end()
            };
            if p.start == end {
                continue;
            }
            out.push(DocumentPartition {
                content_type: p.content_type,
                region: Region::new(p.start, end),
            });
        }
        if out.is_empty() && !self.table.is_empty() {
            // an empty document still reports its single default partition
            out.push(DocumentPartition {
                content_type: self.table.partitions[0].content_type,
                region: doc.region(),
            });
        }
        out
    }

    /// Reconcile the table against one document mutation.
    ///
    /// `doc` is the document *after* the change. The pass adjusts stored
    /// positions, re-tokenizes from the beginning of the first affected
    /// line until the scan reproduces the previously recorded state, and
    /// fires the change listener with the net changed region.
    pub fn document_changed(&mut self, doc: &impl Document, change: &DocumentChange) {
        if change.is_noop() {
            return;
        }
        debug_assert!(self.is_installed(), "document_changed before install");
        let erased = change.erased_region();
        let inserted = change.inserted_region();

        self.adjust_for_erase(doc, erased);
        self.adjust_for_insert(inserted);
        self.table.verify(doc);

        // re-tokenize from the top of the first affected line
        let scan_line = erased.beginning().line.min(inserted.beginning().line);
        let scan_start = Position::bol(scan_line);
        let (run, scan_stop) = self.rescan(doc, scan_start, erased.end().max(inserted.end()));

        // splice the fresh run over the span it replaces
        self.table.erase_partitions(scan_start, scan_stop, doc);
        let anchor = self.table.index_at(scan_start, doc);
        self.table.insert_after(anchor, run);
        self.table.dump();
        self.table.verify(doc);

        let changed = Region::new(scan_start, scan_stop);
        if let Some(listener) = self.listener.as_mut() {
            listener(changed);
        }
    }

    /// Shift partitions across the erased span. Partitions wholly inside
    /// it are deleted (merging neighbours of equal content type);
    /// partitions straddling its edge are clamped to the edge and left
    /// for the rescan to replace.
    fn adjust_for_erase(&mut self, doc: &impl Document, erased: Region) {
        if erased.is_empty() {
            return;
        }
        let mut i = 1;
        while i < self.table.len() {
            let start = self.table.partitions[i].start;
            if start < erased.beginning() {
                i += 1;
            } else if start > erased.end() {
                let p = &mut self.table.partitions[i];
                p.start = position::update_for_erase(p.start, erased);
                p.token_start = position::update_for_erase(p.token_start, erased);
                i += 1;
            } else {
                let next_start = if i + 1 < self.table.len() {
                    self.table.partitions[i + 1].start
                } else {
                    doc.region().end()
                };
                if next_start <= erased.end() {
                    // wholly contained in the erased span
                    self.table.partitions.remove(i);
                    if i < self.table.len()
                        && self.table.partitions[i].content_type
                            == self.table.partitions[i - 1].content_type
                    {
                        self.table.partitions.remove(i);
                    }
                    if self.table.len() == 1 {
                        break;
                    }
                } else {
                    // straddles the edge; clamp, the rescan replaces it
                    let p = &mut self.table.partitions[i];
                    p.start = erased.beginning();
                    p.token_start = erased.beginning();
                    i += 1;
                }
            }
        }
    }

    /// Shift partitions forward across the inserted span.
    fn adjust_for_insert(&mut self, inserted: Region) {
        if inserted.is_empty() {
            return;
        }
        for p in self.table.partitions.iter_mut().skip(1) {
            p.start = position::update_for_insert(p.start, inserted, position::Direction::Forward);
            p.token_start =
                position::update_for_insert(p.token_start, inserted, position::Direction::Forward);
        }
    }

    /// Tokenize from `scan_start` until the scan has passed `affected_end`
    /// and reproduces the content type the table already records, or until
    /// the end of the document. Returns the fresh partition run and the
    /// position the scan stopped at.
    fn rescan(
        &self,
        doc: &impl Document,
        scan_start: Position,
        affected_end: Position,
    ) -> (Vec<Partition>, Position) {
        let mut run: Vec<Partition> = Vec::new();
        let mut pos = scan_start;
        let mut line_text = doc.line_text(pos.line).into_owned();
        let mut line_len = line_text.chars().count();

        // content type in effect immediately before the scan start, i.e.
        // at the end of the previous line (a line the edit cannot have
        // touched, so the table is still trustworthy there)
        let mut content_type = if pos.line == 0 {
            ContentType::DEFAULT
        } else {
            let prev_eol = Position::new(pos.line - 1, doc.line_length(pos.line - 1));
            self.table.partitions[self.table.index_at_or_before(prev_eol)].content_type
        };

        loop {
            let at_eol = pos.offset >= line_len;
            let mut token_length = 0;
            if let Some(t) = self.rules.try_transition(&line_text, pos.offset, content_type) {
                // a line terminator counts as zero width
                token_length = if at_eol {
                    0
                } else {
                    t.length.min(line_len - pos.offset)
                };
                if t.destination != content_type {
                    run.push(Partition::new(t.destination, pos, pos, token_length));
                    content_type = t.destination;
                }
                if token_length > 0 {
                    // continue behind the token
                    pos.offset += token_length;
                }
            }
            if at_eol {
                if pos.line + 1 >= doc.line_count() {
                    break; // end of the document
                }
                // past the affected span and the old state is reproduced
                if pos >= affected_end && self.transition_state_at(doc, pos) == content_type {
                    break; // rescan frontier reached
                }
            }
            if token_length == 0 {
                if at_eol {
                    pos = Position::bol(pos.line + 1);
                    line_text = doc.line_text(pos.line).into_owned();
                    line_len = line_text.chars().count();
                } else {
                    pos.offset += 1;
                }
            }
        }
        (run, pos)
    }

    /// Content type the (pre-commit) table records immediately before any
    /// transition at `at`.
    ///
    /// The scan consults this at end-of-line positions to decide whether
    /// it may stop. A partition starting exactly at `at` is a transition
    /// the scan would re-derive itself, so it must not count as
    /// reproduced state; stepping back past it keeps the scan going until
    /// the stale record falls inside the committed erase range. Stopping
    /// on it instead would leave both the old record and the freshly
    /// scanned one in the table.
    fn transition_state_at(&self, doc: &impl Document, at: Position) -> ContentType {
        if at == doc.region().beginning() {
            return ContentType::DEFAULT;
        }
        let mut i = self.table.index_at(at, doc);
        if i > 0 && self.table.partitions[i].start == at {
            i -= 1;
        }
        self.table.partitions[i].content_type
    }
}

impl std::fmt::Debug for Partitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partitioner")
            .field("rules", &self.rules)
            .field("partitions", &self.table.len())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Convenience host coupling one [`TextBuffer`] with one [`Partitioner`].
///
/// Every edit is applied to the buffer and the resulting change is
/// forwarded to the partitioner before the call returns, so queries always
/// observe a consistent pair.
pub struct PartitionedDocument {
    buffer: TextBuffer,
    partitioner: Partitioner,
}

impl PartitionedDocument {
    /// Create a host over `text` and partition it with `rules`.
    pub fn new(text: &str, rules: TransitionRuleSet) -> Self {
        let buffer = TextBuffer::from_text(text);
        let mut partitioner = Partitioner::new(rules);
        partitioner.install(&buffer);
        Self {
            buffer,
            partitioner,
        }
    }

    /// The text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The partitioner.
    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    /// The partitioner, mutably (listener registration).
    pub fn partitioner_mut(&mut self) -> &mut Partitioner {
        &mut self.partitioner
    }

    /// Insert `text` at `at` and repartition.
    pub fn insert(&mut self, at: Position, text: &str) -> Result<(), EditError> {
        let change = self.buffer.insert(at, text)?;
        self.partitioner.document_changed(&self.buffer, &change);
        Ok(())
    }

    /// Erase `region` and repartition.
    pub fn erase(&mut self, region: Region) -> Result<(), EditError> {
        let change = self.buffer.erase(region)?;
        self.partitioner.document_changed(&self.buffer, &change);
        Ok(())
    }

    /// Replace `region` with `text` and repartition.
    pub fn replace(&mut self, region: Region, text: &str) -> Result<(), EditError> {
        let change = self.buffer.replace(region, text)?;
        self.partitioner.document_changed(&self.buffer, &change);
        Ok(())
    }

    /// The partition governing `at`.
    pub fn partition_at(&self, at: Position) -> DocumentPartition {
        self.partitioner.partition_at(&self.buffer, at)
    }

    /// Snapshot of every partition in document order.
    pub fn partitions(&self) -> Vec<DocumentPartition> {
        self.partitioner.partitions(&self.buffer)
    }
}

impl std::fmt::Debug for PartitionedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedDocument")
            .field("buffer", &self.buffer)
            .field("partitioner", &self.partitioner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MatcherRule;

    const TYPE_A: ContentType = ContentType::new(1);

    /// "X" begins a TypeA token; TypeA falls back to default immediately
    /// after the token (zero-width transition).
    fn toggle_rules() -> TransitionRuleSet {
        let mut rules = TransitionRuleSet::new();
        rules.add_rule(Box::new(MatcherRule::new(
            ContentType::DEFAULT,
            TYPE_A,
            |line: &str, offset| {
                (line.chars().nth(offset) == Some('X')).then_some(1)
            },
        )));
        rules.add_rule(Box::new(MatcherRule::new(
            TYPE_A,
            ContentType::DEFAULT,
            |_line: &str, _offset| Some(0),
        )));
        rules
    }

    fn spans(doc: &PartitionedDocument) -> Vec<(ContentType, Position, Position)> {
        doc.partitions()
            .iter()
            .map(|p| (p.content_type, p.region.beginning(), p.region.end()))
            .collect()
    }

    #[test]
    fn test_install_performs_full_scan() {
        let doc = PartitionedDocument::new("aXbXc", toggle_rules());
        assert_eq!(
            spans(&doc),
            vec![
                (ContentType::DEFAULT, Position::new(0, 0), Position::new(0, 1)),
                (TYPE_A, Position::new(0, 1), Position::new(0, 2)),
                (ContentType::DEFAULT, Position::new(0, 2), Position::new(0, 3)),
                (TYPE_A, Position::new(0, 3), Position::new(0, 4)),
                (ContentType::DEFAULT, Position::new(0, 4), Position::new(0, 5)),
            ]
        );
    }

    #[test]
    fn test_uninstall_releases_table() {
        let buffer = TextBuffer::from_text("aXb");
        let mut partitioner = Partitioner::new(toggle_rules());
        partitioner.install(&buffer);
        assert!(partitioner.is_installed());
        partitioner.uninstall();
        assert!(!partitioner.is_installed());
    }

    #[test]
    fn test_listener_fires_once_per_pass() {
        let mut doc = PartitionedDocument::new("aXb", toggle_rules());
        let fired = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&fired);
        doc.partitioner_mut()
            .set_listener(move |region| sink.borrow_mut().push(region));

        doc.insert(Position::new(0, 0), "y").unwrap();
        assert_eq!(fired.borrow().len(), 1);
        let changed = fired.borrow()[0];
        assert_eq!(changed.beginning(), Position::ZERO);
    }

    #[test]
    fn test_content_type_at() {
        let doc = PartitionedDocument::new("aXb", toggle_rules());
        let buffer = doc.buffer();
        assert_eq!(
            doc.partitioner().content_type_at(buffer, Position::new(0, 0)),
            ContentType::DEFAULT
        );
        assert_eq!(
            doc.partitioner().content_type_at(buffer, Position::new(0, 1)),
            TYPE_A
        );
        assert_eq!(
            doc.partitioner().content_type_at(buffer, Position::new(0, 2)),
            ContentType::DEFAULT
        );
    }
}
