//! Geo-data layer: typed wrappers around geospatial payloads
//!
//! Each wrapper enforces a payload-shape contract at construction and
//! carries (or infers) the coordinate reference system of its data. The
//! plot layer dispatches on [`ElementKind`] and reads the CRS back out to
//! pick a display projection.

pub mod element;
pub mod payload;
pub mod variants;

use gv_core::Crs;
use thiserror::Error;

// Re-exports
pub use element::{CloneOverrides, GeoElement, GeoOptions};
pub use payload::GeoPayload;
pub use variants::{
    AnyGeoElement, Contours, DynamicTiles, ElementKind, Feature, Image, Points, Text, TileService,
};

/// Errors raised while constructing geo elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// The payload does not match the wrapper's required shape.
    #[error("{element} data has to be {expected}, got {received}")]
    TypeMismatch {
        element: &'static str,
        expected: &'static str,
        received: String,
    },

    /// An explicitly supplied CRS disagrees with the one inferred from the
    /// payload.
    #[error("supplied coordinate reference system {supplied:?} must match the crs of the data ({inferred:?})")]
    CrsConflict { supplied: Crs, inferred: Crs },
}
