// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and JPEG fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! and the in-memory JPEG builders that the integration tests use as well.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

#[path = "../tests/common/mod.rs"]
mod fixtures;

pub use fixtures::{jpeg_with_exif, make_field, plain_jpeg, png_header, write_file, GpsFixture};

/// Default epsilon for f64 comparisons of decimal degrees.
pub const F64_EPSILON: f64 = 1e-9;
