// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding candidate drone photos.
//!
//! This module walks the input directory, keeps the files whose names look like
//! JPEGs and returns them sorted by file name so that repeated runs over the
//! same directory visit images in the same order.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Which file names count as JPEG candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionMatch {
    /// Only `.jpg` and `.JPG`
    #[default]
    Strict,
    /// `.jpg` in any letter case (`.Jpg`, `.jPG`, ...)
    AnyCase,
}

/// Options controlling a directory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Descend into sub-directories
    pub recursive: bool,
    pub extension_match: ExtensionMatch,
}

/// Returns true when `name` ends with a JPEG extension accepted by `matching`.
#[must_use]
pub fn is_candidate(name: &str, matching: ExtensionMatch) -> bool {
    match matching {
        ExtensionMatch::Strict => name.ends_with(".jpg") || name.ends_with(".JPG"),
        ExtensionMatch::AnyCase => name.to_ascii_lowercase().ends_with(".jpg"),
    }
}

/// Scans `directory` for candidate files, sorted by file name.
///
/// Only the directory itself is visited unless `options.recursive` is set.
/// Entries that cannot be read are logged and skipped; failing to read the
/// directory itself is an error.
pub fn scan_directory(directory: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::Io(format!(
            "Input folder does not exist or is not a directory: {}",
            directory.display()
        )));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => {
                return Err(Error::Io(format!(
                    "Failed to read {}: {}",
                    directory.display(),
                    error
                )));
            }
            Err(error) => {
                warn!(%error, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if is_candidate(&name, options.extension_match) {
            debug!(path = %entry.path().display(), "Discovered image");
            candidates.push(entry.into_path());
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"fake image data").expect("failed to write test file");
        path
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn strict_matching_accepts_only_two_spellings() {
        assert!(is_candidate("DJI_0001.JPG", ExtensionMatch::Strict));
        assert!(is_candidate("a.jpg", ExtensionMatch::Strict));
        assert!(!is_candidate("a.Jpg", ExtensionMatch::Strict));
        assert!(!is_candidate("a.jpeg", ExtensionMatch::Strict));
        assert!(!is_candidate("a.png", ExtensionMatch::Strict));
        assert!(!is_candidate("jpg", ExtensionMatch::Strict));
    }

    #[test]
    fn any_case_matching_ignores_letter_case() {
        assert!(is_candidate("a.Jpg", ExtensionMatch::AnyCase));
        assert!(is_candidate("a.jPG", ExtensionMatch::AnyCase));
        assert!(is_candidate("a.JPG", ExtensionMatch::AnyCase));
        assert!(!is_candidate("a.jpeg", ExtensionMatch::AnyCase));
    }

    #[test]
    fn scan_directory_sorts_by_file_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "c.jpg");
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "b.JPG");
        touch(temp_dir.path(), "notes.txt");

        let found = scan_directory(temp_dir.path(), &ScanOptions::default()).expect("scan");
        assert_eq!(names(&found), ["a.jpg", "b.JPG", "c.jpg"]);
    }

    #[test]
    fn scan_directory_respects_extension_match() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "a.Jpg");
        touch(temp_dir.path(), "b.jpg");

        let strict = scan_directory(temp_dir.path(), &ScanOptions::default()).expect("scan");
        assert_eq!(names(&strict), ["b.jpg"]);

        let options = ScanOptions {
            extension_match: ExtensionMatch::AnyCase,
            ..ScanOptions::default()
        };
        let any_case = scan_directory(temp_dir.path(), &options).expect("scan");
        assert_eq!(names(&any_case), ["a.Jpg", "b.jpg"]);
    }

    #[test]
    fn scan_directory_skips_subdirectories_unless_recursive() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "top.jpg");
        let nested = temp_dir.path().join("flight2");
        fs::create_dir(&nested).expect("failed to create sub-directory");
        touch(&nested, "deep.jpg");
        fs::create_dir(temp_dir.path().join("folder.jpg")).expect("failed to create dir");

        let flat = scan_directory(temp_dir.path(), &ScanOptions::default()).expect("scan");
        assert_eq!(names(&flat), ["top.jpg"]);

        let options = ScanOptions {
            recursive: true,
            ..ScanOptions::default()
        };
        let all = scan_directory(temp_dir.path(), &options).expect("scan");
        assert_eq!(names(&all), ["deep.jpg", "top.jpg"]);
    }

    #[test]
    fn scan_directory_handles_empty_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let found = scan_directory(temp_dir.path(), &ScanOptions::default()).expect("scan");
        assert!(found.is_empty());
    }

    #[test]
    fn scan_directory_rejects_missing_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("missing");
        let result = scan_directory(&missing, &ScanOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn scan_directory_rejects_file_path() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = touch(temp_dir.path(), "a.jpg");
        assert!(scan_directory(&file, &ScanOptions::default()).is_err());
    }
}
