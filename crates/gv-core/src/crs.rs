//! Coordinate reference systems and point transforms.
//!
//! A [`Crs`] names the coordinate system a piece of geographic data lives
//! in, or the projection a plot renders into. Descriptors are immutable
//! values compared structurally; converting coordinates between two systems
//! goes through the explicit [`Crs::transform_from`] operation.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spherical earth radius in meters, shared by all projected systems.
const EARTH_RADIUS: f64 = 6_378_137.0;

/// Errors raised by point transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The mapping has no defined result at this point, e.g. a pole under
    /// Mercator or the far hemisphere under an orthographic view.
    #[error("no defined mapping for point ({x}, {y})")]
    Undefined { x: f64, y: f64 },
}

/// A coordinate reference system descriptor.
///
/// `PlateCarree` doubles as the geodetic system: its coordinates are plain
/// longitude/latitude degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Crs {
    PlateCarree { central_longitude: f64 },
    Mercator { central_longitude: f64 },
    Orthographic { central_longitude: f64, central_latitude: f64 },
}

impl Default for Crs {
    fn default() -> Self {
        Crs::PlateCarree {
            central_longitude: 0.0,
        }
    }
}

impl Crs {
    /// The standard geodetic system (longitude/latitude degrees).
    pub fn plate_carree() -> Self {
        Crs::default()
    }

    pub fn mercator() -> Self {
        Crs::Mercator {
            central_longitude: 0.0,
        }
    }

    pub fn orthographic(central_longitude: f64, central_latitude: f64) -> Self {
        Crs::Orthographic {
            central_longitude,
            central_latitude,
        }
    }

    /// Whether this system wraps periodically in the horizontal direction.
    pub fn is_cylindrical(&self) -> bool {
        matches!(self, Crs::PlateCarree { .. } | Crs::Mercator { .. })
    }

    /// Projects a geodetic (longitude, latitude) point, in degrees, into
    /// this system's plane.
    pub fn project(&self, lonlat: Coord<f64>) -> Result<Coord<f64>, TransformError> {
        let undefined = || TransformError::Undefined {
            x: lonlat.x,
            y: lonlat.y,
        };
        if !lonlat.x.is_finite() || !lonlat.y.is_finite() {
            return Err(undefined());
        }
        match *self {
            Crs::PlateCarree { central_longitude } => Ok(Coord {
                x: wrap_degrees(lonlat.x - central_longitude),
                y: lonlat.y,
            }),
            Crs::Mercator { central_longitude } => {
                // Singular at the poles.
                if lonlat.y.abs() >= 90.0 {
                    return Err(undefined());
                }
                let lon = wrap_degrees(lonlat.x - central_longitude).to_radians();
                let lat = lonlat.y.to_radians();
                Ok(Coord {
                    x: EARTH_RADIUS * lon,
                    y: EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
                })
            }
            Crs::Orthographic {
                central_longitude,
                central_latitude,
            } => {
                let lon = wrap_degrees(lonlat.x - central_longitude).to_radians();
                let lat = lonlat.y.to_radians();
                let lat0 = central_latitude.to_radians();
                let cos_c = lat0.sin() * lat.sin() + lat0.cos() * lat.cos() * lon.cos();
                // Points on the far hemisphere have no image.
                if cos_c < 0.0 {
                    return Err(undefined());
                }
                Ok(Coord {
                    x: EARTH_RADIUS * lat.cos() * lon.sin(),
                    y: EARTH_RADIUS * (lat0.cos() * lat.sin() - lat0.sin() * lat.cos() * lon.cos()),
                })
            }
        }
    }

    /// Inverts a point in this system's plane back to geodetic
    /// (longitude, latitude) degrees.
    pub fn unproject(&self, xy: Coord<f64>) -> Result<Coord<f64>, TransformError> {
        let undefined = || TransformError::Undefined { x: xy.x, y: xy.y };
        if !xy.x.is_finite() || !xy.y.is_finite() {
            return Err(undefined());
        }
        match *self {
            Crs::PlateCarree { central_longitude } => Ok(Coord {
                x: wrap_degrees(xy.x + central_longitude),
                y: xy.y,
            }),
            Crs::Mercator { central_longitude } => {
                let lon = (xy.x / EARTH_RADIUS).to_degrees() + central_longitude;
                let lat =
                    (2.0 * (xy.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
                        .to_degrees();
                Ok(Coord {
                    x: wrap_degrees(lon),
                    y: lat,
                })
            }
            Crs::Orthographic {
                central_longitude,
                central_latitude,
            } => {
                let rho = xy.x.hypot(xy.y);
                if rho > EARTH_RADIUS {
                    return Err(undefined());
                }
                let lat0 = central_latitude.to_radians();
                if rho == 0.0 {
                    return Ok(Coord {
                        x: wrap_degrees(central_longitude),
                        y: central_latitude,
                    });
                }
                let c = (rho / EARTH_RADIUS).asin();
                let lat = (c.cos() * lat0.sin() + xy.y * c.sin() * lat0.cos() / rho).asin();
                let lon = central_longitude.to_radians()
                    + (xy.x * c.sin()).atan2(rho * c.cos() * lat0.cos() - xy.y * c.sin() * lat0.sin());
                Ok(Coord {
                    x: wrap_degrees(lon.to_degrees()),
                    y: lat.to_degrees(),
                })
            }
        }
    }

    /// Transforms a point expressed in `src` coordinates into this system.
    ///
    /// Equal systems are an identity; otherwise the point is routed through
    /// geodetic coordinates, so either leg can fail with
    /// [`TransformError::Undefined`].
    pub fn transform_from(
        &self,
        src: &Crs,
        point: Coord<f64>,
    ) -> Result<Coord<f64>, TransformError> {
        if self == src {
            return Ok(point);
        }
        let geodetic = src.unproject(point)?;
        self.project(geodetic)
    }
}

/// Wraps a degree value into [-180, 180).
fn wrap_degrees(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
