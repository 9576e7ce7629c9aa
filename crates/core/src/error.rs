use thiserror::Error;

use crate::document::DocumentId;

#[derive(Error, Debug)]
pub enum DocexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, DocexError>;
