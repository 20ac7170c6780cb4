// SPDX-License-Identifier: MPL-2.0
//! Image-side processing: reading embedded tags and turning them into
//! coordinate records.

pub mod coordinates;
pub mod metadata;

// Re-export commonly used types
pub use coordinates::{dms_to_decimal, transform, GpsOutcome, MalformedGps};
pub use metadata::{read_tags, ImageHandle};
