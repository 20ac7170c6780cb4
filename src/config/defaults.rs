// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application.

// ==========================================================================
// Storage
// ==========================================================================

/// Directory name under the platform configuration directory.
pub const APP_NAME: &str = "DjiPhotoCoords";

/// Settings file name inside [`APP_NAME`].
pub const CONFIG_FILE: &str = "settings.toml";

// ==========================================================================
// Run Defaults
// ==========================================================================

/// Output table written when neither the command line nor the settings
/// file name one. Relative paths resolve against the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

/// Sub-directories are not scanned by default.
pub const DEFAULT_RECURSIVE: bool = false;

/// Only `.jpg` and `.JPG` are matched by default.
pub const DEFAULT_MATCH_ANY_CASE: bool = false;
