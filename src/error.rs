//! Typed errors for the geographic filter types and criteria enums.
//!
//! Everything else in the crate either degrades silently (criteria, comparison)
//! or reports through `anyhow` at the IO edges.

use thiserror::Error;

/// Errors produced while constructing or decoding a polygon filter.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Fewer than three distinct vertices
    #[error("polygon needs at least 3 distinct vertices, got {distinct}")]
    DegenerateRing { distinct: usize },

    /// GeoJSON geometry of some other type
    #[error("expected a Polygon geometry, got {kind}")]
    NotAPolygon { kind: String },

    /// GeoJSON polygon without an outer ring
    #[error("polygon geometry has no coordinates")]
    EmptyCoordinates,

    /// Vertex outside the latitude/longitude ranges, usually swapped axes
    #[error("vertex ({lat}, {lng}) is out of range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Unrecognized text for one of the criteria enums
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown listing status {0:?}")]
    UnknownStatus(String),

    #[error("unknown sort order {0:?}")]
    UnknownSort(String),
}
