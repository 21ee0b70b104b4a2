//! Static cartographic features, tile sources and text annotations.
//!
//! These are the opaque collaborator payloads the geo element layer wraps:
//! a map feature and a tile source each expose their own [`Crs`]; a text
//! annotation is a plain anchored-label tuple.

use geo_types::Coord;
use serde::{Deserialize, Serialize};

use crate::crs::Crs;

/// A static cartographic feature (coastlines, borders, rivers, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub name: String,
    /// Coordinate system the geometry is expressed in.
    pub crs: Crs,
    /// Line geometry, one coordinate string per part.
    pub geometry: Vec<Vec<Coord<f64>>>,
}

impl MapFeature {
    pub fn new(name: impl Into<String>, crs: Crs, geometry: Vec<Vec<Coord<f64>>>) -> Self {
        Self {
            name: name.into(),
            crs,
            geometry,
        }
    }
}

/// A zoom-dependent raster imagery source.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub name: String,
    /// Coordinate system the tiles are served in.
    pub crs: Crs,
    pub url_template: String,
}

impl TileSource {
    pub fn new(name: impl Into<String>, crs: Crs, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            crs,
            url_template: url_template.into(),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// A text label anchored at an (x, y) position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub fontsize: f32,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Label rotation in degrees.
    pub rotation: f64,
}

impl TextAnnotation {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            fontsize: 12.0,
            halign: HAlign::default(),
            valign: VAlign::default(),
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn anchor(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}
