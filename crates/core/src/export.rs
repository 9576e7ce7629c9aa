//! Serialize a document's extracted data into a downloadable file.
//!
//! Exports are plain values: building one performs no I/O. Hand the result
//! to [`crate::download::deliver`] to actually write it somewhere.

use std::str::FromStr;

use serde::Serialize;

use crate::document::DocumentRecord;
use crate::error::DocexError;
use crate::flatten::flatten;
use crate::value::StructuredValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DocexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(DocexError::InvalidArgument(format!(
                "unsupported export format '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered export, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

/// Export `data` for the document titled `title`.
///
/// Returns `None` when there is no data to export.
pub fn export(title: &str, data: Option<&StructuredValue>, format: ExportFormat) -> Option<ExportFile> {
    let data = data?;
    let content = match format {
        ExportFormat::Json => data.to_pretty_json(),
        ExportFormat::Csv => to_csv(data),
    };
    Some(ExportFile {
        filename: format!("{}_extracted.{}", title, format.extension()),
        mime_type: format.mime_type().to_string(),
        content,
    })
}

/// [`export`] using a record's title and extracted data.
pub fn export_record(record: &DocumentRecord, format: ExportFormat) -> Option<ExportFile> {
    export(&record.title, record.extracted_data.as_ref(), format)
}

/// Pretty JSON of the whole extraction, as offered by the raw-view copy action.
pub fn copy_all_payload(data: &StructuredValue) -> String {
    data.to_pretty_json()
}

/// One header row of flat paths and one row of quoted values.
///
/// Values are wrapped in double quotes without escaping, so values that
/// themselves contain quotes, commas, or newlines produce malformed CSV.
fn to_csv(data: &StructuredValue) -> String {
    let flat = flatten(data, "");
    let header = flat.keys().map(String::as_str).collect::<Vec<_>>().join(",");
    let values = flat
        .values()
        .map(|v| format!("\"{}\"", v.printable()))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}\n{}", header, values)
}
