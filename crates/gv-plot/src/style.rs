//! Style options, extents and the ranges hook.

use ahash::AHashMap;
use gv_core::{Crs, Dimension};
use gv_element::{AnyGeoElement, GeoPayload};
use serde::{Deserialize, Serialize};

/// Immutable style options handed into `get_data` and returned, possibly
/// modified, rather than mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub cmap: Option<String>,
    pub alpha: Option<f64>,
    pub color: Option<String>,
    /// Color-scale bounds derived from the value dimension.
    pub clim: Option<(f64, f64)>,
    /// Explicit contour levels, when not given as a count.
    pub levels: Option<Vec<f64>>,
    /// Source CRS for draw-time point reprojection.
    pub transform: Option<Crs>,
}

/// Per-dimension (min, max) ranges computed by the generic ranging logic.
pub type RangeMap = AHashMap<String, (f64, f64)>;

/// Computes nan-aware ranges for every dimension of a container-backed
/// element. Non-container elements yield an empty map.
pub fn compute_ranges(element: &AnyGeoElement) -> RangeMap {
    let mut ranges = RangeMap::new();
    match element.element().payload() {
        GeoPayload::Dataset(dataset) => {
            for dim in dataset.kdims.iter().chain(dataset.vdims.iter()) {
                if let Some(range) = dataset.range(&dim.name) {
                    ranges.insert(dim.name.clone(), range);
                }
            }
        }
        GeoPayload::Grid(grid) => {
            if let Some(range) = gv_core::grid::nan_range(&grid.x.points) {
                ranges.insert(grid.x.name.clone(), range);
            }
            if let Some(range) = gv_core::grid::nan_range(&grid.y.points) {
                ranges.insert(grid.y.name.clone(), range);
            }
            if let Some(range) = grid.value_range() {
                ranges.insert(grid.name.clone(), range);
            }
        }
        _ => {}
    }
    ranges
}

/// A (left, bottom, right, top) bounding box in some CRS's coordinate
/// space. Undefined coordinates are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Extent {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }
}

/// The base extent of a 2D-addressed element, from its first two key
/// dimension ranges.
pub fn extent_from_ranges(kdims: &[Dimension], ranges: &RangeMap) -> Option<Extent> {
    match kdims {
        [xdim, ydim, ..] => {
            let (left, right) = *ranges.get(&xdim.name)?;
            let (bottom, top) = *ranges.get(&ydim.name)?;
            Some(Extent::new(left, bottom, right, top))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{CoordSystem, Dataset, GridCoord, GridData};
    use gv_element::{GeoOptions, Image};

    fn image_element() -> AnyGeoElement {
        let grid = GridData::new(
            "z",
            GridCoord::new("x", vec![-10.0, 0.0, 10.0]),
            GridCoord::new("y", vec![40.0, 50.0]),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        );
        Image::new(
            GeoPayload::Dataset(Dataset::from_grid(grid)),
            GeoOptions::default(),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn ranges_cover_key_and_value_dimensions() {
        let ranges = compute_ranges(&image_element());
        assert_eq!(ranges.get("x"), Some(&(-10.0, 10.0)));
        assert_eq!(ranges.get("y"), Some(&(40.0, 50.0)));
        assert_eq!(ranges.get("z"), Some(&(1.0, 6.0)));
    }

    #[test]
    fn extent_comes_from_the_first_two_key_dimensions() {
        let element = image_element();
        let ranges = compute_ranges(&element);
        let extent = extent_from_ranges(element.kdims().unwrap(), &ranges).unwrap();
        assert_eq!(extent, Extent::new(-10.0, 40.0, 10.0, 50.0));
    }
}
