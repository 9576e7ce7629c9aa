//! Response shapes delivered by the document store.
//!
//! The store wraps payloads as `{"success": true, "documents": [...]}` for
//! listings and `{"success": true, "document": {...}}` for details. A failed
//! call carries `{"success": false, "message": "..."}` instead.

use serde::{Deserialize, Serialize};

use crate::document::DocumentRecord;
use crate::error::{DocexError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListResponse {
    /// The listing, newest first as the store orders it.
    pub fn into_documents(self) -> Result<Vec<DocumentRecord>> {
        if self.success {
            Ok(self.documents)
        } else {
            Err(store_failure(self.message, "Error retrieving documents"))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub success: bool,
    #[serde(default)]
    pub document: Option<DocumentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DetailResponse {
    pub fn into_document(self) -> Result<DocumentRecord> {
        match (self.success, self.document) {
            (true, Some(document)) => Ok(document),
            (true, None) => Err(DocexError::Store("response carried no document".to_string())),
            (false, _) => Err(store_failure(self.message, "Error retrieving document details")),
        }
    }
}

fn store_failure(message: Option<String>, fallback: &str) -> DocexError {
    DocexError::Store(message.unwrap_or_else(|| fallback.to_string()))
}
