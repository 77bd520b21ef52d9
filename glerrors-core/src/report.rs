// Report model and writers

use crate::harvest::HarvestOutcome;
use glerrors_scanner::PageResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// One function signature and the errors listed on its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub signature: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub source: String,
    pub generated_at: String,
    pub pages: usize,
    pub failed_pages: usize,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Build report entries from page results, in extraction order.
    ///
    /// Every non-empty signature on a successful page gets its own entry
    /// carrying all of that page's non-empty errors. Failed pages contribute
    /// nothing.
    pub fn from_pages(source: &str, pages: &[PageResult]) -> Self {
        let mut entries = Vec::new();
        for page in pages.iter().filter(|p| p.is_ok()) {
            let errors: Vec<String> = page
                .extract
                .errors
                .iter()
                .filter(|e| !e.is_empty())
                .cloned()
                .collect();

            for signature in page.extract.signatures.iter().filter(|s| !s.is_empty()) {
                entries.push(ReportEntry {
                    signature: signature.clone(),
                    errors: errors.clone(),
                });
            }
        }

        Report {
            source: source.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            pages: pages.len(),
            failed_pages: pages.iter().filter(|p| !p.is_ok()).count(),
            entries,
        }
    }

    pub fn from_outcome(outcome: &HarvestOutcome) -> Self {
        Self::from_pages(&outcome.index_url, &outcome.pages)
    }
}

/// Signature line, error lines, blank line; one record per entry
pub fn write_text_report<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    for entry in &report.entries {
        writeln!(writer, "{}", entry.signature)?;
        for error in &entry.errors {
            writeln!(writer, "{}", error)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_json_report<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

pub fn write_report<W: Write>(writer: &mut W, report: &Report, format: ReportFormat) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text_report(writer, report),
        ReportFormat::Json => write_json_report(writer, report),
    }
}

pub fn generate_text_report(report: &Report) -> io::Result<String> {
    let mut buf = Vec::new();
    write_text_report(&mut buf, report)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Create (or truncate) `path` and write the report to it
pub fn save_report(path: &Path, report: &Report, format: ReportFormat) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, report, format)?;
    writer.flush()
}
