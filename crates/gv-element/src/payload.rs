//! Geo payload shapes and CRS inference.

use gv_core::{Crs, Dataset, GridData, MapFeature, TextAnnotation, TileSource};

/// The payload shapes a geo element can wrap.
///
/// Adding a payload shape means adding a variant here plus an arm in
/// [`GeoPayload::inferred_crs`]; the match is exhaustive on purpose.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoPayload {
    /// A generic dimensioned container wrapping gridded or scattered data.
    Dataset(Dataset),
    /// A bare gridded field, not yet wrapped in a container.
    Grid(GridData),
    /// A static cartographic feature.
    Feature(MapFeature),
    /// A zoom-dependent tile source.
    TileSource(TileSource),
    /// A tile service URL.
    Url(String),
    /// An anchored text label.
    Annotation(TextAnnotation),
}

impl GeoPayload {
    /// Human-readable name of the wrapped shape, used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoPayload::Dataset(_) => "Dataset",
            GeoPayload::Grid(_) => "GridData",
            GeoPayload::Feature(_) => "MapFeature",
            GeoPayload::TileSource(_) => "TileSource",
            GeoPayload::Url(_) => "str",
            GeoPayload::Annotation(_) => "TextAnnotation",
        }
    }

    /// Infers the payload's CRS, where its shape allows one.
    ///
    /// Dataset payloads are unwrapped one level to read the underlying
    /// container's coordinate-system descriptor; features and tile sources
    /// carry their CRS directly. A payload with no inferable CRS yields
    /// `None`, which is not an error.
    pub fn inferred_crs(&self) -> Option<Crs> {
        match self {
            GeoPayload::Dataset(dataset) => {
                dataset.coord_system().and_then(|cs| cs.as_projection())
            }
            GeoPayload::Grid(grid) => {
                grid.coord_system.as_ref().and_then(|cs| cs.as_projection())
            }
            GeoPayload::Feature(feature) => Some(feature.crs.clone()),
            GeoPayload::TileSource(source) => Some(source.crs.clone()),
            GeoPayload::Url(_) => None,
            GeoPayload::Annotation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{CoordSystem, GridCoord, ScatterData};

    fn geodetic_grid() -> GridData {
        GridData::new(
            "z",
            GridCoord::new("x", vec![0.0, 1.0]),
            GridCoord::new("y", vec![0.0, 1.0]),
            vec![0.0, 1.0, 2.0, 3.0],
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        )
    }

    #[test]
    fn grid_with_descriptor_infers_projection() {
        let payload = GeoPayload::Grid(geodetic_grid());
        assert_eq!(payload.inferred_crs(), Some(Crs::plate_carree()));
    }

    #[test]
    fn dataset_wrapper_is_unwrapped_for_inference() {
        let payload = GeoPayload::Dataset(Dataset::from_grid(geodetic_grid()));
        assert_eq!(payload.inferred_crs(), Some(Crs::plate_carree()));
    }

    #[test]
    fn cartesian_descriptor_infers_nothing() {
        let mut grid = geodetic_grid();
        grid.coord_system = Some(CoordSystem::Cartesian);
        assert_eq!(GeoPayload::Grid(grid).inferred_crs(), None);
    }

    #[test]
    fn feature_and_tile_source_expose_their_own_crs() {
        let feature = MapFeature::new("coastline", Crs::mercator(), Vec::new());
        assert_eq!(
            GeoPayload::Feature(feature).inferred_crs(),
            Some(Crs::mercator())
        );
        let source = TileSource::new("osm", Crs::mercator(), "https://tile/{z}/{x}/{y}.png");
        assert_eq!(
            GeoPayload::TileSource(source).inferred_crs(),
            Some(Crs::mercator())
        );
    }

    #[test]
    fn inference_is_deterministic_for_equal_payloads() {
        let a = GeoPayload::Dataset(Dataset::from_scatter(ScatterData::new(
            vec![0.0],
            vec![0.0],
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        )));
        let b = a.clone();
        assert_eq!(a.inferred_crs(), b.inferred_crs());
    }
}
