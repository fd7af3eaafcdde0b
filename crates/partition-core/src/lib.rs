#![warn(missing_docs)]
//! Partition Core - Incremental Lexical Partitioning Engine
//!
//! # Overview
//!
//! `partition-core` classifies regions of an editable document into
//! disjoint, contiguous **partitions**, each tagged with a content type
//! (code vs. comment vs. string-literal and so on), and keeps that
//! classification up to date across edits without re-scanning the whole
//! document. Downstream consumers (highlighters, renderers, structural
//! navigators) ask "what content type governs this position" and get an
//! answer in O(log n).
//!
//! The engine is headless and storage-agnostic: text lives behind the
//! [`Document`] trait, rules behind [`TransitionRule`], and rendering is
//! someone else's problem.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Partitioner (incremental re-lexing)        │  ← reacts to edits
//! ├─────────────────────────────────────────────┤
//! │  Partition Table (sorted run of records)    │  ← O(log n) lookup
//! ├─────────────────────────────────────────────┤
//! │  Transition Rule Set (ordered matchers)     │  ← host-supplied
//! ├─────────────────────────────────────────────┤
//! │  Document trait (line text access)          │  ← host-supplied
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use partition_core::{
//!     ContentType, MatcherRule, PartitionedDocument, Position, TransitionRuleSet,
//! };
//!
//! const MARKED: ContentType = ContentType::new(1);
//!
//! let mut rules = TransitionRuleSet::new();
//! // '#' opens a marked region...
//! rules.add_rule(Box::new(MatcherRule::new(
//!     ContentType::DEFAULT,
//!     MARKED,
//!     |line: &str, offset| (line.chars().nth(offset) == Some('#')).then_some(1),
//! )));
//! // ...which ends at the end of the line.
//! rules.add_rule(Box::new(MatcherRule::new(
//!     MARKED,
//!     ContentType::DEFAULT,
//!     |line: &str, offset| (offset == line.chars().count()).then_some(0),
//! )));
//!
//! let mut doc = PartitionedDocument::new("code # note\ncode", rules);
//! assert_eq!(
//!     doc.partition_at(Position::new(0, 7)).content_type,
//!     MARKED
//! );
//! assert_eq!(
//!     doc.partition_at(Position::new(1, 2)).content_type,
//!     ContentType::DEFAULT
//! );
//!
//! // typing inside the marked region re-lexes only the affected span
//! doc.insert(Position::new(0, 8), "!").unwrap();
//! assert_eq!(
//!     doc.partition_at(Position::new(0, 8)).content_type,
//!     MARKED
//! );
//! ```
//!
//! # Module Description
//!
//! - [`position`] - positions, regions, and the edit transform
//! - [`content_type`] - opaque content type tags
//! - [`document`] - the document interface the engine consumes
//! - [`buffer`] - rope-backed reference text buffer
//! - [`rules`] - transition rules and the ordered rule set
//! - [`partitioner`] - the incremental repartitioner
//!
//! Concrete literal/regex rule implementations live in the companion
//! `partition-core-rules` crate.
//!
//! # Invariants
//!
//! After every public operation the partition table is non-empty and
//! anchored at the document beginning, strictly ordered by start
//! position, free of adjacent partitions with equal content types, and
//! covers every document position exactly once. Debug builds assert all
//! of this after each pass; release builds skip the checks entirely.

pub mod buffer;
pub mod content_type;
pub mod document;
pub mod partitioner;
pub mod position;
pub mod rules;

mod table;

pub use buffer::{EditError, TextBuffer};
pub use content_type::ContentType;
pub use document::{Document, DocumentChange};
pub use partitioner::{DocumentPartition, PartitionedDocument, Partitioner};
pub use position::{update_position, Direction, Position, Region};
pub use rules::{MatcherRule, Transition, TransitionRule, TransitionRuleSet};
