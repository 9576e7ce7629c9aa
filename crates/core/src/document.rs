use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::StructuredValue;

/// Store-assigned document identifier, stable across views.
pub type DocumentId = u64;

/// Default number of top-level fields shown in a listing preview.
pub const PREVIEW_FIELDS: usize = 3;

/// Default character budget per previewed value.
pub const PREVIEW_CHARS: usize = 50;

/// One uploaded document plus its optional extraction result.
///
/// Owned by the store; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub document_type: DocumentType,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub processed: bool,
    /// Seconds the extraction took. Only present once processed.
    #[serde(default, rename = "processing_time", skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,
    /// When the extraction result was stored. Expected to be `>= uploaded_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<StructuredValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

impl DocumentRecord {
    /// A freshly uploaded, not yet processed document.
    pub fn new(
        id: DocumentId,
        title: impl Into<String>,
        document_type: DocumentType,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            document_type,
            uploaded_at,
            processed: false,
            processing_time_seconds: None,
            created_at: None,
            extracted_data: None,
            custom_prompt: None,
        }
    }

    /// Mark the document processed with the given extraction result.
    pub fn with_extraction(
        mut self,
        data: StructuredValue,
        processing_time_seconds: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        self.processed = true;
        self.extracted_data = Some(data);
        self.processing_time_seconds = Some(processing_time_seconds);
        self.created_at = Some(created_at);
        self
    }

    pub fn status(&self) -> DocumentStatus {
        if self.processed {
            DocumentStatus::Processed
        } else {
            DocumentStatus::Pending
        }
    }

    /// Short preview of the extracted data for listing rows.
    ///
    /// Takes the first `max_fields` top-level entries; each value is cut to
    /// `max_chars` characters with `...` appended when cut. Nested values
    /// preview as compact JSON. No data (or non-object data) yields nothing.
    pub fn preview(&self, max_fields: usize, max_chars: usize) -> Vec<PreviewEntry> {
        let Some(fields) = self.extracted_data.as_ref().and_then(|d| d.as_object()) else {
            return Vec::new();
        };

        fields
            .iter()
            .take(max_fields)
            .map(|(key, value)| {
                let full = match value {
                    StructuredValue::Scalar(s) => s.printable(),
                    other => other.to_compact_json(),
                };
                let truncated = full.chars().count() > max_chars;
                let mut text: String = full.chars().take(max_chars).collect();
                if truncated {
                    text.push_str("...");
                }
                PreviewEntry {
                    key: key.clone(),
                    text,
                }
            })
            .collect()
    }
}

/// A single `key: value` fragment of a listing preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub key: String,
    pub text: String,
}

// ── Document type ───────────────────────────────────────────────────

/// Kind of document, which decides the extraction schema upstream.
///
/// Unknown wire values are classified as [`DocumentType::Other`] rather
/// than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Invoice,
    Resume,
    ResearchPaper,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Invoice,
        DocumentType::Resume,
        DocumentType::ResearchPaper,
        DocumentType::Other,
    ];

    /// Lenient parse: anything unrecognised becomes `Other`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "invoice" => DocumentType::Invoice,
            "resume" => DocumentType::Resume,
            "research_paper" => DocumentType::ResearchPaper,
            _ => DocumentType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Resume => "resume",
            DocumentType::ResearchPaper => "research_paper",
            DocumentType::Other => "other",
        }
    }

    /// Title-cased name used in pickers.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "Invoice",
            DocumentType::Resume => "Resume",
            DocumentType::ResearchPaper => "Research Paper",
            DocumentType::Other => "Other",
        }
    }

    /// Wire name with underscores shown as spaces, as on badges.
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            DocumentType::Invoice => BadgeTone::Blue,
            DocumentType::Resume => BadgeTone::Green,
            DocumentType::ResearchPaper => BadgeTone::Purple,
            DocumentType::Other => BadgeTone::Gray,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DocumentType {
    fn from(s: String) -> Self {
        DocumentType::from_wire(&s)
    }
}

impl From<DocumentType> for String {
    fn from(t: DocumentType) -> Self {
        t.as_str().to_string()
    }
}

/// Colour family for a document type badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Blue,
    Green,
    Purple,
    Gray,
}

// ── Status ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Processed,
    Pending,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Processed => "Processed",
            DocumentStatus::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn deserialize_store_record() {
        let record: DocumentRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "Invoice_2024_001.pdf",
            "document_type": "invoice",
            "uploaded_at": "2024-01-15T10:30:00Z",
            "processed": true,
            "processing_time": 2.5,
            "created_at": "2024-01-15T10:32:30Z",
            "extracted_data": {"amount": "$1,250.00", "vendor": "ABC Corp"}
        }))
        .unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.document_type, DocumentType::Invoice);
        assert_eq!(record.processing_time_seconds, Some(2.5));
        assert_eq!(record.created_at, Some(ts("2024-01-15T10:32:30Z")));
        assert_eq!(record.status(), DocumentStatus::Processed);
        assert!(record.extracted_data.is_some());
        assert!(record.custom_prompt.is_none());
    }

    #[test]
    fn pending_record_has_no_extraction_fields() {
        let record: DocumentRecord = serde_json::from_value(json!({
            "id": 3,
            "title": "Research_Paper_AI.pdf",
            "document_type": "research_paper",
            "uploaded_at": "2024-01-13T09:20:00Z",
            "processed": false,
            "extracted_data": null
        }))
        .unwrap();

        assert_eq!(record.status(), DocumentStatus::Pending);
        assert!(record.extracted_data.is_none());
        assert!(record.processing_time_seconds.is_none());
    }

    #[test]
    fn unknown_type_falls_back_to_other() {
        assert_eq!(DocumentType::from_wire("contract"), DocumentType::Other);
        assert_eq!(DocumentType::from_wire(""), DocumentType::Other);

        let t: DocumentType = serde_json::from_value(json!("purchase_order")).unwrap();
        assert_eq!(t, DocumentType::Other);
        assert_eq!(t.tone(), BadgeTone::Gray);
        assert_eq!(serde_json::to_value(t).unwrap(), json!("other"));
    }

    #[test]
    fn type_names() {
        assert_eq!(DocumentType::ResearchPaper.as_str(), "research_paper");
        assert_eq!(DocumentType::ResearchPaper.label(), "Research Paper");
        assert_eq!(DocumentType::ResearchPaper.display_name(), "research paper");
        assert_eq!(DocumentType::Invoice.tone(), BadgeTone::Blue);
    }

    #[test]
    fn preview_truncates_and_limits_fields() {
        let long = "x".repeat(60);
        let record = DocumentRecord::new(1, "a.pdf", DocumentType::Invoice, ts("2024-01-01T00:00:00Z"))
            .with_extraction(
                json!({
                    "vendor": "ABC Corp",
                    "notes": long,
                    "items": [{"qty": 1}],
                    "total": 10
                })
                .into(),
                1.0,
                ts("2024-01-01T00:00:05Z"),
            );

        let preview = record.preview(PREVIEW_FIELDS, PREVIEW_CHARS);
        assert_eq!(preview.len(), 3);
        assert_eq!(preview[0], PreviewEntry { key: "vendor".into(), text: "ABC Corp".into() });
        assert_eq!(preview[1].text, format!("{}...", "x".repeat(50)));
        assert_eq!(preview[2].text, r#"[{"qty":1}]"#);
    }

    #[test]
    fn preview_of_pending_record_is_empty() {
        let record = DocumentRecord::new(2, "b.pdf", DocumentType::Resume, ts("2024-01-01T00:00:00Z"));
        assert!(record.preview(3, 50).is_empty());
    }
}
