//! Loading documents from a saved store response.

use std::path::Path;

use anyhow::{Context, Result};
use docex_core::{DocexError, DocumentId, DocumentRecord, ListResponse};
use serde_json::Value;
use tracing::debug;

/// Read a listing file: either the store's `{"success", "documents"}`
/// envelope or a bare JSON array of documents.
pub fn load_documents(path: &Path) -> Result<Vec<DocumentRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read documents: {}", path.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse documents: {}", path.display()))?;

    let documents = if raw.is_array() {
        serde_json::from_value::<Vec<DocumentRecord>>(raw)
            .with_context(|| format!("invalid document array in {}", path.display()))?
    } else {
        serde_json::from_value::<ListResponse>(raw)
            .with_context(|| format!("invalid store response in {}", path.display()))?
            .into_documents()?
    };

    debug!(count = documents.len(), path = %path.display(), "Loaded documents");
    Ok(documents)
}

pub fn find_document(documents: &[DocumentRecord], id: DocumentId) -> Result<&DocumentRecord, DocexError> {
    documents
        .iter()
        .find(|d| d.id == id)
        .ok_or(DocexError::DocumentNotFound(id))
}
