//! Coordinate-system descriptors and dimension metadata.

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::grid::GridCoord;

/// The coordinate-system descriptor carried by gridded containers.
///
/// This is the shape the gridded-data collaborator reports for its
/// coordinates; a descriptor may or may not be convertible to a display
/// projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordSystem {
    /// Plain geodetic longitude/latitude coordinates.
    Geodetic { prime_meridian: f64 },
    /// Coordinates already projected to a Mercator plane.
    Mercator { central_longitude: f64 },
    /// Arbitrary cartesian coordinates with no geographic meaning.
    Cartesian,
}

impl CoordSystem {
    /// Converts the descriptor to a projection, where one exists.
    ///
    /// `Cartesian` coordinate systems have no projection equivalent and
    /// yield `None`.
    pub fn as_projection(&self) -> Option<Crs> {
        match *self {
            CoordSystem::Geodetic { prime_meridian } => Some(Crs::PlateCarree {
                central_longitude: prime_meridian,
            }),
            CoordSystem::Mercator { central_longitude } => {
                Some(Crs::Mercator { central_longitude })
            }
            CoordSystem::Cartesian => None,
        }
    }
}

/// A named dimension of a dataset, with an optional unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub unit: Option<String>,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
        }
    }

    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }

    /// Builds a dimension from a grid coordinate's metadata.
    pub fn from_coord(coord: &GridCoord) -> Self {
        Self {
            name: coord.name.clone(),
            unit: coord.unit.clone(),
        }
    }
}
