//! Search, filter, and sort over a document listing.
//!
//! A [`QueryState`] is a complete, immutable description of what the
//! listing should show. Every change produces a new state and the whole
//! collection is recomputed with [`apply`].
//!
//! Sort keys are compared with a total order and the sort is stable, so
//! records with equal keys keep their input order.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{DocumentRecord, DocumentType};
use crate::error::DocexError;

// ── Query state ─────────────────────────────────────────────────────

/// Combined search, filter, and sort criteria for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub type_filter: TypeFilter,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for QueryState {
    /// Newest first, nothing filtered.
    fn default() -> Self {
        Self {
            search_text: String::new(),
            type_filter: TypeFilter::All,
            status_filter: StatusFilter::All,
            sort_key: SortKey::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

impl QueryState {
    /// True when search text or any filter can hide documents.
    ///
    /// Listing surfaces use this to pick between "adjust your filters" and
    /// "upload your first document" when nothing is shown.
    pub fn is_narrowed(&self) -> bool {
        !self.search_text.is_empty()
            || self.type_filter != TypeFilter::All
            || self.status_filter != StatusFilter::All
    }

    /// Whether a single record passes search, type, and status criteria.
    pub fn matches(&self, record: &DocumentRecord) -> bool {
        self.matches_lowered(record, &self.search_text.to_lowercase())
    }

    fn matches_lowered(&self, record: &DocumentRecord, lowered_needle: &str) -> bool {
        record.title.to_lowercase().contains(lowered_needle)
            && self.type_filter.accepts(record.document_type)
            && self.status_filter.accepts(record.processed)
    }
}

/// `all` or a single document type.
///
/// Stricter than [`DocumentType`] itself: an unknown name is rejected
/// instead of filtering on `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(DocumentType),
}

impl TypeFilter {
    pub fn accepts(&self, document_type: DocumentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == document_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = DocexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "invoice" | "resume" | "research_paper" | "other" => {
                Ok(TypeFilter::Only(DocumentType::from_wire(s)))
            }
            other => Err(DocexError::InvalidArgument(format!(
                "unknown document type filter '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = DocexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => f.write_str(t.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Processed,
    Pending,
}

impl StatusFilter {
    pub fn accepts(&self, processed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Processed => processed,
            StatusFilter::Pending => !processed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DocexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "processed" => Ok(StatusFilter::Processed),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(DocexError::InvalidArgument(format!(
                "unknown status filter '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Processed => "processed",
            StatusFilter::Pending => "pending",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Type,
    Status,
}

impl FromStr for SortKey {
    type Err = DocexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "type" => Ok(SortKey::Type),
            "status" => Ok(SortKey::Status),
            other => Err(DocexError::InvalidArgument(format!(
                "unknown sort key '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Type => "type",
            SortKey::Status => "status",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = DocexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DocexError::InvalidArgument(format!(
                "unknown sort order '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

// ── Sort keys ───────────────────────────────────────────────────────

/// Value a record is ordered by for a given [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyValue {
    Timestamp(DateTime<Utc>),
    Text(String),
    Flag(u8),
}

fn sort_value(record: &DocumentRecord, key: SortKey) -> KeyValue {
    match key {
        SortKey::Date => KeyValue::Timestamp(record.uploaded_at),
        SortKey::Title => KeyValue::Text(record.title.to_lowercase()),
        SortKey::Type => KeyValue::Text(record.document_type.as_str().to_string()),
        SortKey::Status => KeyValue::Flag(u8::from(record.processed)),
    }
}

/// Three-way comparison of two records under a key and direction.
pub fn compare(a: &DocumentRecord, b: &DocumentRecord, key: SortKey, order: SortOrder) -> Ordering {
    let ord = sort_value(a, key).cmp(&sort_value(b, key));
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

// ── Pipeline ────────────────────────────────────────────────────────

/// Filter and sort `records` according to `state`.
///
/// Returns a new vector; the input is untouched. The result is always a
/// subsequence (as a multiset) of the input.
pub fn apply(records: &[DocumentRecord], state: &QueryState) -> Vec<DocumentRecord> {
    let needle = state.search_text.to_lowercase();

    let mut matched: Vec<&DocumentRecord> = records
        .iter()
        .filter(|r| state.matches_lowered(r, &needle))
        .collect();

    matched.sort_by(|a, b| compare(a, b, state.sort_key, state.sort_order));

    debug!(
        matched = matched.len(),
        total = records.len(),
        sort_key = %state.sort_key,
        sort_order = %state.sort_order,
        "Applied document query"
    );

    matched.into_iter().cloned().collect()
}

/// Counts for a "Showing N of M documents" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub shown: usize,
    pub total: usize,
}

impl QueryOutcome {
    pub fn new(shown: &[DocumentRecord], all: &[DocumentRecord]) -> Self {
        Self {
            shown: shown.len(),
            total: all.len(),
        }
    }
}

impl std::fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} documents", self.shown, self.total)
    }
}
