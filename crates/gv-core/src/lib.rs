//! Core abstractions for the geo visualization layers
//!
//! This crate provides the coordinate-reference-system descriptors and the
//! collaborator surfaces (gridded containers, map features, tile sources,
//! annotations, frame collections) consumed by the element and plot crates.

pub mod coords;
pub mod crs;
pub mod feature;
pub mod frames;
pub mod grid;

// Re-export commonly used types
pub use coords::{CoordSystem, Dimension};
pub use crs::{Crs, TransformError};
pub use feature::{HAlign, MapFeature, TextAnnotation, TileSource, VAlign};
pub use frames::FrameSequence;
pub use grid::{DataShape, Dataset, GridCoord, GridData, ScatterData};
