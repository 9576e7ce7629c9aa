use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use docex_core::{
    render, BadgeTone, DisplayNode, DocumentRecord, DocumentStatus, FlatRecord, NodeKind, QueryOutcome,
    StatsSummary,
};
use std::io::Write;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const DIM: Color = Color::DarkGrey;
    const ERROR: Color = Color::Red;
    const PROCESSED: Color = Color::Green;
    const PENDING: Color = Color::Yellow;
    const KEY: Color = Color::Cyan;
}

fn tone_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Blue => Color::Blue,
        BadgeTone::Green => Color::Green,
        BadgeTone::Purple => Color::Magenta,
        BadgeTone::Gray => Color::Grey,
    }
}

fn status_color(status: DocumentStatus) -> Color {
    match status {
        DocumentStatus::Processed => Colors::PROCESSED,
        DocumentStatus::Pending => Colors::PENDING,
    }
}

/// `Jan 15, 2024, 10:30 AM`
pub fn format_short(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `January 15, 2024 at 10:30 AM`
pub fn format_long(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// Writes listings, summaries, and data trees.
pub struct Terminal {
    color: bool,
}

impl Terminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, out: &mut impl Write, color: Color, text: &str) -> Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)?;
        } else {
            queue!(out, Print(text))?;
        }
        Ok(())
    }

    fn heading(&self, out: &mut impl Write, text: &str) -> Result<()> {
        self.paint(out, Colors::HEADER, text)?;
        writeln!(out)?;
        Ok(())
    }

    fn badges(&self, out: &mut impl Write, record: &DocumentRecord) -> Result<()> {
        let t = record.document_type;
        self.paint(out, tone_color(t.tone()), &format!("[{}]", t.display_name()))?;
        write!(out, " ")?;
        let status = record.status();
        self.paint(out, status_color(status), &format!("[{}]", status.label()))?;
        Ok(())
    }

    /// Print one listing row per document, then the result count or an
    /// empty-state hint.
    pub fn print_listing(
        &self,
        out: &mut impl Write,
        shown: &[DocumentRecord],
        outcome: QueryOutcome,
        narrowed: bool,
        preview_fields: usize,
        preview_chars: usize,
    ) -> Result<()> {
        if shown.is_empty() {
            self.heading(out, "No documents found")?;
            let hint = if narrowed {
                "Try adjusting your search or filters"
            } else {
                "Upload your first document to get started"
            };
            self.paint(out, Colors::DIM, hint)?;
            writeln!(out)?;
            out.flush()?;
            return Ok(());
        }

        for record in shown {
            write!(out, "#{:<4} {}  ", record.id, record.title)?;
            self.badges(out, record)?;
            writeln!(out)?;

            let mut meta = format!("      {}", format_short(&record.uploaded_at));
            if let Some(secs) = record.processing_time_seconds {
                meta.push_str(&format!("  Processed in {}s", secs));
            }
            self.paint(out, Colors::DIM, &meta)?;
            writeln!(out)?;

            let preview = record.preview(preview_fields, preview_chars);
            if !preview.is_empty() {
                write!(out, "      ")?;
                for (i, entry) in preview.iter().enumerate() {
                    if i > 0 {
                        write!(out, "  ")?;
                    }
                    self.paint(out, Colors::KEY, &format!("{}:", entry.key))?;
                    write!(out, " {}", entry.text)?;
                }
                writeln!(out)?;
            }
        }

        writeln!(out)?;
        self.paint(out, Colors::DIM, &outcome.to_string())?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn print_stats(&self, out: &mut impl Write, stats: &StatsSummary) -> Result<()> {
        self.heading(out, "Dashboard")?;
        writeln!(out, "Total documents:  {}", stats.total)?;
        writeln!(
            out,
            "Processed:        {} ({}% completion rate)",
            stats.processed_count,
            stats.completion_rate()
        )?;
        writeln!(out, "Pending:          {}", stats.pending_count)?;

        writeln!(out)?;
        self.heading(out, "By type")?;
        for (document_type, count) in &stats.by_type {
            self.paint(out, tone_color(document_type.tone()), &format!("{:<16}", document_type.label()))?;
            writeln!(out, "{}", count)?;
        }

        writeln!(out)?;
        self.heading(out, "Recent documents")?;
        if stats.recent.is_empty() {
            self.paint(out, Colors::DIM, "No documents uploaded yet")?;
            writeln!(out)?;
        }
        for record in &stats.recent {
            write!(out, "#{:<4} {}  {}  ", record.id, record.title, format_short(&record.uploaded_at))?;
            self.badges(out, record)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Document information block followed by its extracted data tree.
    pub fn print_document(
        &self,
        out: &mut impl Write,
        record: &DocumentRecord,
        nodes: &[DisplayNode],
    ) -> Result<()> {
        self.heading(out, &record.title)?;
        self.badges(out, record)?;
        writeln!(out)?;
        writeln!(out, "Uploaded:        {}", format_long(&record.uploaded_at))?;
        if let Some(created) = &record.created_at {
            writeln!(out, "Processed at:    {}", format_long(created))?;
        }
        if let Some(secs) = record.processing_time_seconds {
            writeln!(out, "Processing time: {}s", secs)?;
        }
        if let Some(prompt) = &record.custom_prompt {
            writeln!(out, "Custom prompt:   {}", prompt)?;
        }
        writeln!(out)?;

        if nodes.is_empty() {
            let (title, detail) = if record.processed {
                (
                    "No extracted data",
                    "This document was processed but no data was extracted.",
                )
            } else {
                (
                    "Processing in progress",
                    "Please wait while we extract data from your document.",
                )
            };
            self.heading(out, title)?;
            self.paint(out, Colors::DIM, detail)?;
            writeln!(out)?;
            out.flush()?;
            return Ok(());
        }

        self.heading(out, "Extracted Data")?;
        self.print_tree(out, nodes)?;
        out.flush()?;
        Ok(())
    }

    fn print_tree(&self, out: &mut impl Write, nodes: &[DisplayNode]) -> Result<()> {
        for node in render::walk(nodes) {
            let indent = "  ".repeat(node.depth);
            write!(out, "{}", indent)?;
            self.paint(out, Colors::KEY, &format!("{}:", node.label))?;
            match node.kind {
                NodeKind::Leaf => writeln!(out, " {}", node.copy_payload)?,
                NodeKind::Section => writeln!(out)?,
                NodeKind::List => {
                    writeln!(out)?;
                    for line in node.copy_payload.lines() {
                        writeln!(out, "{}  {}", indent, line)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn print_flat(&self, out: &mut impl Write, flat: &FlatRecord) -> Result<()> {
        for (path, value) in flat {
            self.paint(out, Colors::KEY, path)?;
            writeln!(out, " = {}", value)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn print_info(&self, out: &mut impl Write, msg: &str) -> Result<()> {
        self.paint(out, Colors::DIM, msg)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn print_error(&self, out: &mut impl Write, msg: &str) -> Result<()> {
        self.paint(out, Colors::ERROR, &format!("Error: {}", msg))?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
