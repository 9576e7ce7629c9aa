use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docex_core::{DocumentId, ExportFormat, SortKey, SortOrder, StatusFilter, TypeFilter};

/// Browse, inspect, and export documents with AI-extracted data.
///
/// Reads a saved document-store response (the `{"success": true,
/// "documents": [...]}` listing, or a bare array of documents).
#[derive(Parser, Debug)]
#[command(name = "docex", about = "Browse and export extracted document data")]
pub struct CliArgs {
    /// Document listing file (overrides DOCUMENTS_FILE and the config file)
    #[arg(long, short = 'd', global = true)]
    pub documents: Option<PathBuf>,

    /// Path to config file (default: ~/.config/docex/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List documents with search, filters, and sorting
    List(ListArgs),

    /// Show dashboard totals and the most recent uploads
    Stats,

    /// Show a document's details and extracted data tree
    Show {
        id: DocumentId,
    },

    /// Print a document's extracted data as dotted-path columns
    Flatten {
        id: DocumentId,
    },

    /// Export a document's extracted data to a file
    Export {
        id: DocumentId,

        /// Output format: json or csv
        #[arg(long, short = 'f', default_value = "json")]
        format: ExportFormat,

        /// Directory to write the export into (overrides EXPORT_DIR)
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,
    },

    /// Print the raw value a copy action would place on the clipboard
    Copy {
        id: DocumentId,

        /// Dotted key path of a single field (whole extraction if omitted)
        #[arg(long)]
        path: Option<String>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive title search
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Document type: all, invoice, resume, research_paper, other
    #[arg(long = "type", short = 't', default_value = "all")]
    pub type_filter: TypeFilter,

    /// Status: all, processed, pending
    #[arg(long = "status", default_value = "all")]
    pub status_filter: StatusFilter,

    /// Sort key: date, title, type, status (config default if omitted)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort order: asc or desc (config default if omitted)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use docex_core::DocumentType;

    #[test]
    fn parses_list_flags() {
        let args = CliArgs::try_parse_from([
            "docex", "list", "--search", "inv", "--type", "invoice", "--status", "pending",
            "--sort", "title", "--order", "asc",
        ])
        .unwrap();

        match args.command {
            Command::List(list) => {
                assert_eq!(list.search, "inv");
                assert_eq!(list.type_filter, TypeFilter::Only(DocumentType::Invoice));
                assert_eq!(list.status_filter, StatusFilter::Pending);
                assert_eq!(list.sort, Some(SortKey::Title));
                assert_eq!(list.order, Some(SortOrder::Asc));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(CliArgs::try_parse_from(["docex", "export", "1", "--format", "xlsx"]).is_err());
    }

    #[test]
    fn global_documents_flag_after_subcommand() {
        let args = CliArgs::try_parse_from(["docex", "stats", "--documents", "docs.json"]).unwrap();
        assert_eq!(args.documents, Some(PathBuf::from("docs.json")));
    }
}
