// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! This module provides pure domain types for embedded image metadata:
//! - [`TagDictionary`]: tag identifiers resolved to typed [`TagValue`]s
//! - [`GpsBlock`]: the GPS sub-block keyed by its fixed numeric indices
//! - [`Coordinate`] and [`CoordinateRecord`]: the normalized output of one image
//!
//! Decoding the container (via the `exif` crate) lives in
//! [`crate::media::metadata`]; these types only describe the result.

mod tags;
mod types;

pub use tags::{gps_index, GpsBlock, Rational, TagDictionary, TagKey, TagValue, GPS_GROUP};
pub use types::{
    format_decimal, Altitude, Coordinate, CoordinateRecord, Hemisphere, FEET_PER_METER,
};
