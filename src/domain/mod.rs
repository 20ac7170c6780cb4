// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It has no
//! dependencies on external crates (except `std`) so the coordinate logic
//! can be tested without touching the filesystem or an EXIF decoder.
//!
//! # Modules
//!
//! - [`metadata`]: Tag dictionary model ([`TagDictionary`](metadata::TagDictionary),
//!   [`TagValue`](metadata::TagValue), [`GpsBlock`](metadata::GpsBlock)) and
//!   coordinate output types ([`CoordinateRecord`](metadata::CoordinateRecord))

pub mod metadata;
