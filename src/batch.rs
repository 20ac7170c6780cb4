// SPDX-License-Identifier: MPL-2.0
//! Batch pipeline: discover, read, transform and emit, one image at a time.
//!
//! Per-image problems are logged and recorded in the [`BatchReport`]; only a
//! failing output sink (or an unreadable input directory) aborts the run.

use crate::config::RunContext;
use crate::directory_scanner::scan_directory;
use crate::domain::metadata::CoordinateRecord;
use crate::error::{Error, ImageError, Result};
use crate::export::{CsvSink, RecordSink};
use crate::media::coordinates::{transform, GpsOutcome};
use crate::media::metadata::ImageHandle;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why an image contributed no row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Not a decodable JPEG, or no embedded EXIF segment
    Image(ImageError),
    /// EXIF present but no GPS group; a normal outcome
    NoGps,
    /// GPS group present but unusable
    MalformedGps(String),
}

impl SkipReason {
    /// Returns a stable short key for this reason, used in log lines.
    pub fn reason_key(&self) -> &'static str {
        match self {
            SkipReason::Image(error) => error.reason_key(),
            SkipReason::NoGps => "no-gps",
            SkipReason::MalformedGps(_) => "malformed-gps",
        }
    }

    /// Whether the skip points at a data-quality problem rather than a photo
    /// that simply has no location.
    pub fn is_data_problem(&self) -> bool {
        matches!(
            self,
            SkipReason::Image(ImageError::Unreadable(_)) | SkipReason::MalformedGps(_)
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Image(error) => write!(f, "{}", error),
            SkipReason::NoGps => write!(f, "No GPS data"),
            SkipReason::MalformedGps(msg) => write!(f, "Malformed GPS data: {}", msg),
        }
    }
}

impl From<ImageError> for SkipReason {
    fn from(error: ImageError) -> Self {
        SkipReason::Image(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub images_found: usize,
    pub rows_written: usize,
    pub skipped: Vec<SkippedImage>,
}

impl BatchReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of skips caused by unreadable images or malformed GPS groups.
    pub fn data_problem_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|skipped| skipped.reason.is_data_problem())
            .count()
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Reads and transforms one image.
///
/// # Errors
/// Returns the [`SkipReason`] when the image yields no record.
pub fn process_image(path: &Path) -> std::result::Result<CoordinateRecord, SkipReason> {
    let handle = ImageHandle::open(path).map_err(skip_reason)?;
    let tags = handle.read_tags().map_err(skip_reason)?;

    match transform(handle.file_name(), &tags) {
        GpsOutcome::Located(record) => Ok(record),
        GpsOutcome::NoGps => Err(SkipReason::NoGps),
        GpsOutcome::Malformed(reason) => Err(SkipReason::MalformedGps(reason.to_string())),
    }
}

fn skip_reason(error: Error) -> SkipReason {
    match error {
        Error::Image(image_error) => image_error.into(),
        other => SkipReason::Image(ImageError::Unreadable(other.to_string())),
    }
}

/// Processes `paths` in order, appending one row per located image to `sink`.
///
/// The sink is finished once every image has been visited.
///
/// # Errors
/// Only sink failures are returned; per-image problems are recorded in the
/// report.
pub fn process_images(paths: &[PathBuf], sink: &mut dyn RecordSink) -> Result<BatchReport> {
    let mut report = BatchReport {
        images_found: paths.len(),
        ..BatchReport::default()
    };

    for path in paths {
        debug!(path = %path.display(), "Processing image");
        match process_image(path) {
            Ok(record) => {
                sink.append(&record)?;
                report.rows_written += 1;
                debug!(
                    file = record.file_name(),
                    latitude = record.latitude_dd(),
                    longitude = record.longitude_dd(),
                    altitude_m = record.altitude_m(),
                    "Wrote row"
                );
            }
            Err(reason) => {
                let file_name = display_name(path);
                if reason.is_data_problem() {
                    warn!(file = %file_name, reason = reason.reason_key(), "Skipping image: {}", reason);
                } else {
                    info!(file = %file_name, reason = reason.reason_key(), "Skipping image: {}", reason);
                }
                report.skipped.push(SkippedImage { file_name, reason });
            }
        }
    }

    sink.finish()?;
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs a whole batch: scans the input folder, creates the output table and
/// processes every candidate.
///
/// # Errors
/// Fails if the input folder cannot be read or the output file cannot be
/// created or written.
pub fn run(context: &RunContext) -> Result<BatchReport> {
    let paths = scan_directory(&context.input_dir, &context.scan_options)?;
    info!(
        folder = %context.input_dir.display(),
        images = paths.len(),
        "Scanned input folder"
    );

    let mut sink = CsvSink::create(&context.output_path)?;
    let report = process_images(&paths, &mut sink)?;

    info!(
        images_found = report.images_found,
        rows_written = report.rows_written,
        skipped = report.skipped_count(),
        output = %context.output_path.display(),
        "Batch complete"
    );
    Ok(report)
}
