//! Plot adapter implementations, one per geo element type.

pub mod annotation;
pub mod contour;
pub mod feature;
pub mod points;
pub mod raster;
pub mod tiles;
pub mod wmts;

// Re-exports
pub use annotation::TextPlot;
pub use contour::{ContourPlot, Levels};
pub use feature::FeaturePlot;
pub use points::PointPlot;
pub use raster::ImagePlot;
pub use tiles::TilePlot;
pub use wmts::WmtsPlot;
