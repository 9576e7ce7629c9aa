pub mod config;
pub mod document;
pub mod download;
pub mod envelope;
pub mod error;
pub mod export;
pub mod flatten;
pub mod query;
pub mod render;
pub mod stats;
pub mod value;

pub use config::Config;
pub use document::*;
pub use download::{deliver, Delivered, DownloadTarget, ScopedDownload};
pub use envelope::{DetailResponse, ListResponse};
pub use error::*;
pub use export::{copy_all_payload, export, export_record, ExportFile, ExportFormat};
pub use flatten::{flatten, FlatRecord};
pub use query::{apply, QueryOutcome, QueryState, SortKey, SortOrder, StatusFilter, TypeFilter};
pub use render::{render, render_record, DisplayNode, NodeKind};
pub use stats::{summarize, summarize_by, StatsSummary, RECENT_LIMIT};
pub use value::{Scalar, StructuredValue};
