mod cli;
mod config;
mod delivery;
mod source;
mod terminal;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use docex_core::config::load_dotenv;
use docex_core::query::QueryState;
use docex_core::stats::newest_first;
use docex_core::{
    apply, copy_all_payload, deliver, export_record, flatten, render, render_record, summarize_by,
    Config, ExportFormat, QueryOutcome,
};

use crate::cli::{CliArgs, Command, ListArgs};
use crate::config::CliConfig;
use crate::delivery::DirectoryTarget;
use crate::source::{find_document, load_documents};
use crate::terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "Command failed");
        let terminal = Terminal::new(std::io::stderr().is_terminal());
        let _ = terminal.print_error(&mut std::io::stderr(), &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let env = Config::from_env();
    env.log_summary();

    let args = CliArgs::parse();
    let cli_config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    let terminal = Terminal::new(cli_config.color && !args.no_color);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let documents_path = resolve_documents_path(&args, &env, &cli_config)?;
    let documents = load_documents(&documents_path)?;
    info!(count = documents.len(), "Documents loaded");

    match args.command {
        Command::List(list) => {
            let state = query_state(list, &cli_config);
            let shown = apply(&documents, &state);
            let outcome = QueryOutcome::new(&shown, &documents);
            terminal.print_listing(
                &mut out,
                &shown,
                outcome,
                state.is_narrowed(),
                env.listing.preview_fields,
                env.listing.preview_chars,
            )?;
        }
        Command::Stats => {
            let stats = summarize_by(&documents, newest_first);
            terminal.print_stats(&mut out, &stats)?;
        }
        Command::Show { id } => {
            let record = find_document(&documents, id)?;
            let nodes = render_record(record);
            terminal.print_document(&mut out, record, &nodes)?;
        }
        Command::Flatten { id } => {
            let record = find_document(&documents, id)?;
            match &record.extracted_data {
                Some(data) if !data.is_empty() => {
                    terminal.print_flat(&mut out, &flatten(data, ""))?
                }
                _ => terminal.print_info(&mut out, "No extracted data")?,
            }
        }
        Command::Export {
            id,
            format,
            out_dir,
        } => {
            let record = find_document(&documents, id)?;
            let out_dir = out_dir
                .or_else(|| env.export.out_dir.clone())
                .or_else(|| cli_config.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            run_export(&terminal, &mut out, record, format, out_dir)?;
        }
        Command::Copy { id, path } => {
            let record = find_document(&documents, id)?;
            let Some(data) = &record.extracted_data else {
                terminal.print_info(&mut out, "No extracted data")?;
                return Ok(());
            };
            let payload = match path.as_deref() {
                Some(path) => {
                    let nodes = render(data, 0);
                    render::find(&nodes, path)
                        .map(|node| node.copy_payload.clone())
                        .with_context(|| format!("no field at '{}' in document {}", path, id))?
                }
                None => copy_all_payload(data),
            };
            writeln!(out, "{}", payload)?;
        }
    }

    Ok(())
}

/// `--documents` wins over DOCUMENTS_FILE, which wins over the config file.
fn resolve_documents_path(args: &CliArgs, env: &Config, cli_config: &CliConfig) -> Result<PathBuf> {
    args.documents
        .clone()
        .or_else(|| env.store.documents_file.clone())
        .or_else(|| cli_config.documents_file.clone())
        .context("no document listing given: pass --documents, set DOCUMENTS_FILE, or add documents_file to the config")
}

fn query_state(list: ListArgs, cli_config: &CliConfig) -> QueryState {
    QueryState {
        search_text: list.search,
        type_filter: list.type_filter,
        status_filter: list.status_filter,
        sort_key: list.sort.unwrap_or(cli_config.default_sort),
        sort_order: list.order.unwrap_or(cli_config.default_order),
    }
}

fn run_export(
    terminal: &Terminal,
    out: &mut impl Write,
    record: &docex_core::DocumentRecord,
    format: ExportFormat,
    out_dir: PathBuf,
) -> Result<()> {
    let Some(file) = export_record(record, format) else {
        terminal.print_info(out, "Nothing to export: this document has no extracted data")?;
        return Ok(());
    };

    let mut target = DirectoryTarget::new(out_dir);
    let destination = target.destination_for(&file);
    debug!(destination = %destination.display(), %format, "Exporting");

    if let Some(delivered) = deliver(&mut target, Some(&file))
        .with_context(|| format!("failed to export document {}", record.id))?
    {
        terminal.print_info(
            out,
            &format!(
                "Exported {} ({}, {} bytes) to {}",
                delivered.filename,
                delivered.mime_type,
                delivered.bytes,
                destination.display()
            ),
        )?;
    }
    Ok(())
}
