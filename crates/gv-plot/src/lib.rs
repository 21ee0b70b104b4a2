//! Geo-plot layer: projection-aware rendering adapters
//!
//! One adapter per geo element type, sharing a common base that resolves
//! the display projection, transforms axis extents between coordinate
//! systems, formats geodetic ticks and manages artist lifecycles across
//! redraws.

pub mod axis;
pub mod plot;
pub mod plots;
pub mod registry;
pub mod style;
pub mod ticks;

use gv_core::TransformError;
use gv_element::ElementKind;
use thiserror::Error;

// Re-exports
pub use axis::{Axis, AxisError, ArtistHandle, DrawBackend, DrawCall, DrawLog, RecordingBackend};
pub use plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
pub use registry::{plot_for, BACKEND};
pub use style::{compute_ranges, extent_from_ranges, Extent, RangeMap, Style};
pub use ticks::{AxisSide, DegreeFormatter, TickLocator, TickState, Ticks};

/// Errors raised while rendering geo elements.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The element handed to an adapter is not the kind it renders.
    #[error("expected a {expected:?} element, got {received:?}")]
    ElementMismatch {
        expected: ElementKind,
        received: ElementKind,
    },

    /// An annotation anchor has no defined position in the display
    /// projection. Unlike extent corners this is not recoverable: a label
    /// with an undefined position cannot be drawn.
    #[error("annotation anchor has no defined position in the display projection: {0}")]
    AnchorTransform(#[from] TransformError),

    /// The adapter was handed an element whose payload lacks the data the
    /// draw primitive needs.
    #[error("element payload is missing {0}")]
    MissingData(&'static str),

    /// An opaque draw primitive failed.
    #[error("draw call failed: {0}")]
    Draw(#[from] anyhow::Error),
}
