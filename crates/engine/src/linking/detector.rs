//! The detection pass: find all non-overlapping occurrences of any known
//! entity term in a text.
//!
//! Matching is whole-word and case-sensitive. Candidate terms are searched
//! longest-first so that "John Smith" claims its span before "John" can take
//! an overlapping piece of it; among equal-length terms the candidate built
//! first (catalog order, name before aliases) wins. The pass is a pure
//! function of the text and the catalog snapshot: it holds no state between
//! calls and is safe to re-run redundantly, so callers may debounce or
//! discard stale results however they like.

use std::sync::Arc;

use regex::Regex;

use storylink_domain::common::is_blank;
use storylink_domain::{DetectedLink, Entity, Span};

use super::catalog::EntityCatalog;

/// Scan `text` for occurrences of every term in the catalog.
///
/// Returns links sorted ascending by span start, with pairwise
/// non-overlapping spans. Blank text or an empty catalog yield an empty list.
/// Every full re-scan with identical inputs produces identical output.
pub fn detect(text: &str, catalog: &EntityCatalog) -> Vec<DetectedLink> {
    if is_blank(text) {
        return Vec::new();
    }

    // Every (term, entity) pair is a separate candidate; terms are not
    // deduplicated across entities or within one entity's alias list.
    let mut candidates: Vec<(&str, &Arc<Entity>)> = Vec::new();
    for entity in catalog.entities() {
        for term in entity.match_terms() {
            candidates.push((term, entity));
        }
    }

    // Longest term first. The sort is stable, so equal-length terms keep
    // their construction order.
    candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut accepted: Vec<DetectedLink> = Vec::new();
    for (term, entity) in candidates {
        let Some(pattern) = word_boundary_pattern(term) else {
            continue;
        };
        for m in pattern.find_iter(text) {
            let span = Span::new(m.start(), m.end());
            if accepted.iter().any(|link| span.overlaps(&link.span)) {
                continue;
            }
            accepted.push(DetectedLink::new(Arc::clone(entity), span, m.as_str()));
        }
    }

    accepted.sort_by_key(|link| link.span.start);
    accepted
}

/// Case-sensitive whole-word pattern for a literal term.
///
/// The term is escaped so regex metacharacters match themselves verbatim;
/// `\b` keeps "ARM" from firing inside "ARMADA". Escaped input cannot produce
/// an invalid pattern, but a compile failure skips the term rather than
/// aborting the pass.
fn word_boundary_pattern(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(term))).ok()
}
