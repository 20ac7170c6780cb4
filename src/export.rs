// SPDX-License-Identifier: MPL-2.0
//! Record emitter: accumulates coordinate records as table rows.
//!
//! The column order is fixed by [`CSV_HEADER`]. [`CsvSink`] writes the header
//! as soon as it is created and flushes after every row, so an interrupted run
//! leaves only complete rows behind.

use crate::domain::metadata::{format_decimal, CoordinateRecord};
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column names, in output order.
pub const CSV_HEADER: [&str; 7] = [
    "FileName",
    "Latitude_DMS",
    "Longitude_DMS",
    "Latitude_DD",
    "Longitude_DD",
    "Altitude_m",
    "Altitude_ft",
];

/// Formats a record as one row of text fields in [`CSV_HEADER`] order.
#[must_use]
pub fn record_row(record: &CoordinateRecord) -> [String; 7] {
    [
        record.file_name().to_string(),
        record.latitude_dms().to_string(),
        record.longitude_dms().to_string(),
        format_decimal(record.latitude_dd()),
        format_decimal(record.longitude_dd()),
        format_decimal(record.altitude_m()),
        format_decimal(record.altitude_ft()),
    ]
}

/// Destination for emitted records.
///
/// Rows must be kept in the order they are appended. Any failure is an
/// [`Error::Output`] and aborts the batch.
pub trait RecordSink {
    fn append(&mut self, record: &CoordinateRecord) -> Result<()>;

    /// Flushes everything appended so far to durable storage.
    fn finish(&mut self) -> Result<()>;
}

// =============================================================================
// CsvSink
// =============================================================================

/// Comma-separated output with a mandatory header row.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path`, creating missing parent
    /// directories, and writes the header row.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dirs(path)?;
        let file = File::create(path).map_err(|e| {
            Error::Output(format!("Failed to create {}: {}", path.display(), e))
        })?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps an arbitrary writer and writes the header row.
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        writer.flush().map_err(output_error)?;
        Ok(Self { writer })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Output(e.to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn append(&mut self, record: &CoordinateRecord) -> Result<()> {
        self.writer.write_record(&record_row(record))?;
        self.writer.flush().map_err(output_error)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(output_error)
    }
}

fn output_error(error: std::io::Error) -> Error {
    Error::Output(error.to_string())
}

fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Output(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

// =============================================================================
// MemorySink
// =============================================================================

/// Keeps records in memory; useful for embedding and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<CoordinateRecord>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CoordinateRecord] {
        &self.records
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &CoordinateRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Returns the path a sink for `output` would write to, for status messages.
#[must_use]
pub fn display_path(output: &Path) -> PathBuf {
    fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf())
}
