//! List command implementation.
//!
//! This module implements the `list` command, which displays resources
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{open_engine, GlobalOptions};
use aspire_e2e::ResourceEntry;
use clap::{Args, ValueEnum};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 7] = [
    "id",
    "name",
    "mode",
    "image",
    "registry",
    "build_image",
    "project_path",
];

/// List resources.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,

    /// Show the stored global entries instead of the effective ones
    #[arg(long)]
    pub raw: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;

        let entries: Vec<ResourceEntry> = if self.raw {
            engine.global().resources().values().cloned().collect()
        } else {
            engine.resolve().resources().values().cloned().collect()
        };

        if entries.is_empty() {
            global.logger.status("No resources configured.");
        }

        match self.format {
            OutputFormat::Table => format_as_table(&entries)?,
            OutputFormat::Json => format_as_json(&entries)?,
            OutputFormat::Csv => format_as_delimited(&entries, b',')?,
            OutputFormat::Tsv => format_as_delimited(&entries, b'\t')?,
        }

        Ok(())
    }
}

/// Format resources as a human-readable table.
fn format_as_table(entries: &[ResourceEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for entry in entries {
        writeln!(handle, "{}", row(entry, "-").join("\t"))?;
    }

    Ok(())
}

/// Format resources as JSON, one object per entry in file field naming.
fn format_as_json(entries: &[ResourceEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, entries)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format resources as delimited output (CSV or TSV).
fn format_as_delimited(entries: &[ResourceEntry], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for entry in entries {
        writer.write_record(row(entry, "")).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// One output row, with `missing` standing in for absent values.
fn row(entry: &ResourceEntry, missing: &str) -> [String; 7] {
    let or_missing = |value: Option<&str>| value.unwrap_or(missing).to_string();

    [
        entry.id.clone(),
        or_missing(entry.name.as_deref()),
        entry.mode.to_string(),
        or_missing(entry.full_image().as_deref()),
        or_missing(entry.image_registry.as_deref()),
        entry.build_image.to_string(),
        or_missing(entry.project_path.as_deref()),
    ]
}
