//! Spans and detected links - the output of a detection pass
//!
//! # Invariants
//!
//! Within one detection result the set of spans is pairwise non-overlapping
//! (`a.end <= b.start || b.end <= a.start` for any two links) and the result
//! sequence is sorted ascending by `span.start`. Detected links are transient:
//! every detection pass recomputes them in full, nothing is cached or mutated
//! in place.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A half-open byte range `[start, end)` into a scanned text.
///
/// Offsets are `&str` byte offsets (the text's native code units) and always
/// fall on character boundaries when produced by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Two ranges overlap iff `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// One resolved occurrence of an entity term in a text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLink {
    /// The matched entity (shared with the catalog snapshot, not owned).
    pub entity: Arc<Entity>,
    /// Where the term occurred in the scanned text.
    pub span: Span,
    /// Exact substring matched, original casing and whitespace preserved.
    pub matched_text: String,
}

impl DetectedLink {
    pub fn new(entity: Arc<Entity>, span: Span, matched_text: impl Into<String>) -> Self {
        Self {
            entity,
            span,
            matched_text: matched_text.into(),
        }
    }
}
