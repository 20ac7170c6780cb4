// SPDX-License-Identifier: MPL-2.0
//! `dji_photo_coords` extracts the GPS position embedded in drone photos and
//! writes one CSV row per located image.
//!
//! The pipeline reads each JPEG's EXIF segment into a typed tag dictionary,
//! converts the GPS group into signed decimal degrees, DMS text and altitude
//! in meters and feet, and appends the result to a record sink.

#![doc(html_root_url = "https://docs.rs/dji_photo_coords/0.3.0")]

pub mod batch;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod export;
pub mod media;

#[cfg(test)]
mod test_utils;
