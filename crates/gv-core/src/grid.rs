//! Gridded and scattered data containers.
//!
//! [`GridData`] is the raw gridded payload (a 2D field over x/y
//! coordinates, optionally tagged with a [`CoordSystem`]); [`ScatterData`]
//! is a flat collection of (lon, lat) samples. [`Dataset`] is the generic
//! dimensioned container that wraps either shape and exposes key/value
//! dimensions and per-dimension ranges.

use geo_types::Coord;

use crate::coords::{CoordSystem, Dimension};

/// A single grid coordinate axis: name, optional unit, sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoord {
    pub name: String,
    pub unit: Option<String>,
    pub points: Vec<f64>,
}

impl GridCoord {
    pub fn new(name: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            points,
        }
    }

    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
            points,
        }
    }
}

/// A 2D scalar field over two coordinate axes.
///
/// Values are stored row-major with y varying slowest:
/// `values[j * x.points.len() + i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridData {
    /// Name of the measured quantity, e.g. `"air_temperature"`.
    pub name: String,
    pub x: GridCoord,
    pub y: GridCoord,
    pub values: Vec<f64>,
    /// Coordinate system the axes are expressed in, if known.
    pub coord_system: Option<CoordSystem>,
}

impl GridData {
    pub fn new(
        name: impl Into<String>,
        x: GridCoord,
        y: GridCoord,
        values: Vec<f64>,
        coord_system: Option<CoordSystem>,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            values,
            coord_system,
        }
    }

    /// Nan-aware range of the field values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        nan_range(&self.values)
    }

    pub fn value_at(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.x.points.len() || j >= self.y.points.len() {
            return None;
        }
        self.values.get(j * self.x.points.len() + i).copied()
    }
}

/// A flat collection of geographic point samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterData {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub coord_system: Option<CoordSystem>,
}

impl ScatterData {
    pub fn new(lon: Vec<f64>, lat: Vec<f64>, coord_system: Option<CoordSystem>) -> Self {
        Self {
            lon,
            lat,
            coord_system,
        }
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.lon
            .iter()
            .zip(self.lat.iter())
            .map(|(&x, &y)| Coord { x, y })
    }

    pub fn len(&self) -> usize {
        self.lon.len().min(self.lat.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The concrete shape wrapped by a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub enum DataShape {
    Grid(GridData),
    Scatter(ScatterData),
}

/// Generic dimensioned container over gridded or scattered data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub shape: DataShape,
    pub kdims: Vec<Dimension>,
    pub vdims: Vec<Dimension>,
}

impl Dataset {
    /// Wraps a grid, inferring key dimensions from its coordinate metadata
    /// and a single value dimension from the quantity name.
    pub fn from_grid(grid: GridData) -> Self {
        let kdims = vec![Dimension::from_coord(&grid.x), Dimension::from_coord(&grid.y)];
        let vdims = vec![Dimension::new(grid.name.clone())];
        Self {
            shape: DataShape::Grid(grid),
            kdims,
            vdims,
        }
    }

    /// Wraps a scatter collection addressed by longitude/latitude.
    pub fn from_scatter(scatter: ScatterData) -> Self {
        Self {
            shape: DataShape::Scatter(scatter),
            kdims: vec![Dimension::new("longitude"), Dimension::new("latitude")],
            vdims: Vec::new(),
        }
    }

    /// The coordinate-system descriptor of the wrapped shape, if any.
    pub fn coord_system(&self) -> Option<&CoordSystem> {
        match &self.shape {
            DataShape::Grid(grid) => grid.coord_system.as_ref(),
            DataShape::Scatter(scatter) => scatter.coord_system.as_ref(),
        }
    }

    /// Nan-aware (min, max) range along the named dimension.
    pub fn range(&self, dim: &str) -> Option<(f64, f64)> {
        match &self.shape {
            DataShape::Grid(grid) => {
                if dim == grid.x.name {
                    nan_range(&grid.x.points)
                } else if dim == grid.y.name {
                    nan_range(&grid.y.points)
                } else if dim == grid.name {
                    grid.value_range()
                } else {
                    None
                }
            }
            DataShape::Scatter(scatter) => match dim {
                "longitude" => nan_range(&scatter.lon),
                "latitude" => nan_range(&scatter.lat),
                _ => None,
            },
        }
    }
}

/// Computes (min, max) skipping NaN samples; `None` if nothing is finite.
pub fn nan_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range
}
