//! Dashboard summary over a document listing.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::document::{DocumentRecord, DocumentType};

/// Maximum number of documents in [`StatsSummary::recent`].
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total: usize,
    pub processed_count: usize,
    pub pending_count: usize,
    /// At most [`RECENT_LIMIT`] documents, in input order.
    pub recent: Vec<DocumentRecord>,
    /// Document count per type, in [`DocumentType::ALL`] order.
    pub by_type: Vec<(DocumentType, usize)>,
}

impl StatsSummary {
    /// Share of processed documents as a whole percentage, 0 when empty.
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.processed_count as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Summarize `records` as received.
///
/// Precondition: `records` are ordered newest first by `uploaded_at`, as the
/// store delivers them. `recent` is simply the first [`RECENT_LIMIT`] records;
/// no sorting happens here. A violated precondition is logged, not rejected.
/// Use [`summarize_by`] when the ordering is not guaranteed.
pub fn summarize(records: &[DocumentRecord]) -> StatsSummary {
    if !records
        .windows(2)
        .all(|pair| pair[0].uploaded_at >= pair[1].uploaded_at)
    {
        warn!(
            count = records.len(),
            "Records are not newest-first; recent documents follow input order"
        );
    }

    let processed_count = records.iter().filter(|r| r.processed).count();
    let by_type = DocumentType::ALL
        .iter()
        .map(|t| (*t, records.iter().filter(|r| r.document_type == *t).count()))
        .collect();

    StatsSummary {
        total: records.len(),
        processed_count,
        pending_count: records.len() - processed_count,
        recent: records.iter().take(RECENT_LIMIT).cloned().collect(),
        by_type,
    }
}

/// Order a copy of `records` with `compare`, then summarize it.
pub fn summarize_by<F>(records: &[DocumentRecord], compare: F) -> StatsSummary
where
    F: FnMut(&DocumentRecord, &DocumentRecord) -> Ordering,
{
    let mut ordered = records.to_vec();
    ordered.sort_by(compare);
    summarize(&ordered)
}

/// Comparator for [`summarize_by`]: most recently uploaded first.
pub fn newest_first(a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    b.uploaded_at.cmp(&a.uploaded_at)
}
