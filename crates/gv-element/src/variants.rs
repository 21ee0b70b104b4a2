//! Concrete geo element wrappers.
//!
//! Each wrapper strictly checks its payload shape before delegating to
//! [`GeoElement`] construction, and delegates cloning back through the base
//! so the CRS-preservation contract holds for every variant.

use geo_types::Coord;
use gv_core::{DataShape, Dataset, Dimension, GridData, MapFeature, TextAnnotation, TileSource};

use crate::element::{CloneOverrides, GeoElement, GeoOptions};
use crate::payload::GeoPayload;
use crate::GeoError;

/// Tag identifying the concrete wrapper type, used for adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Feature,
    TileService,
    DynamicTiles,
    Points,
    Contours,
    Image,
    Text,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Feature => "Feature",
            ElementKind::TileService => "TileService",
            ElementKind::DynamicTiles => "DynamicTiles",
            ElementKind::Points => "Points",
            ElementKind::Contours => "Contours",
            ElementKind::Image => "Image",
            ElementKind::Text => "Text",
        }
    }
}

fn mismatch(kind: ElementKind, expected: &'static str, payload: &GeoPayload) -> GeoError {
    GeoError::TypeMismatch {
        element: kind.name(),
        expected,
        received: payload.type_name().to_string(),
    }
}

/// Extracts the key dimensions of a gridded or scattered payload, failing
/// for any other shape.
fn container_kdims(
    kind: ElementKind,
    payload: &GeoPayload,
) -> Result<Vec<Dimension>, GeoError> {
    match payload {
        GeoPayload::Dataset(dataset) => Ok(dataset.kdims.clone()),
        GeoPayload::Grid(grid) => Ok(vec![
            Dimension::from_coord(&grid.x),
            Dimension::from_coord(&grid.y),
        ]),
        other => Err(mismatch(kind, "a gridded or point container", other)),
    }
}

/// Extracts the single value dimension of a gridded payload.
fn container_vdim(kind: ElementKind, payload: &GeoPayload) -> Result<Dimension, GeoError> {
    match payload {
        GeoPayload::Dataset(dataset) => match dataset.vdims.as_slice() {
            [vdim] => Ok(vdim.clone()),
            vdims => Err(GeoError::TypeMismatch {
                element: kind.name(),
                expected: "a container with exactly one value dimension",
                received: format!("Dataset with {} value dimensions", vdims.len()),
            }),
        },
        GeoPayload::Grid(grid) => Ok(Dimension::new(grid.name.clone())),
        other => Err(mismatch(kind, "a gridded container", other)),
    }
}

/// Finds the gridded field inside a payload already validated as gridded.
fn container_grid(payload: &GeoPayload) -> Option<&GridData> {
    match payload {
        GeoPayload::Dataset(Dataset {
            shape: DataShape::Grid(grid),
            ..
        }) => Some(grid),
        GeoPayload::Grid(grid) => Some(grid),
        _ => None,
    }
}

/// A static cartographic feature with an associated CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    element: GeoElement,
}

impl Feature {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        if !matches!(payload, GeoPayload::Feature(_)) {
            return Err(mismatch(ElementKind::Feature, "a MapFeature", &payload));
        }
        let element = GeoElement::new(payload, opts, "Feature")?;
        Ok(Self { element })
    }

    pub fn feature(&self) -> &MapFeature {
        match self.element.payload() {
            GeoPayload::Feature(feature) => feature,
            // Construction guarantees the payload shape.
            _ => unreachable!("Feature payload validated at construction"),
        }
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        if !matches!(element.payload(), GeoPayload::Feature(_)) {
            return Err(mismatch(ElementKind::Feature, "a MapFeature", element.payload()));
        }
        Ok(Self { element })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A Web Map Tile Service layer addressed by a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TileService {
    element: GeoElement,
    layer: String,
}

impl TileService {
    pub fn new(
        payload: GeoPayload,
        layer: impl Into<String>,
        opts: GeoOptions,
    ) -> Result<Self, GeoError> {
        if !matches!(payload, GeoPayload::Url(_)) {
            return Err(mismatch(
                ElementKind::TileService,
                "a tile service URL",
                &payload,
            ));
        }
        let element = GeoElement::new(payload, opts, "TileService")?;
        Ok(Self {
            element,
            layer: layer.into(),
        })
    }

    pub fn url(&self) -> &str {
        match self.element.payload() {
            GeoPayload::Url(url) => url,
            _ => unreachable!("TileService payload validated at construction"),
        }
    }

    /// The layer on the tile service.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        if !matches!(element.payload(), GeoPayload::Url(_)) {
            return Err(mismatch(
                ElementKind::TileService,
                "a tile service URL",
                element.payload(),
            ));
        }
        Ok(Self {
            element,
            layer: self.layer.clone(),
        })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A zoom-dependent tile source rendered at a caller-chosen zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTiles {
    element: GeoElement,
}

impl DynamicTiles {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        if !matches!(payload, GeoPayload::TileSource(_)) {
            return Err(mismatch(ElementKind::DynamicTiles, "a TileSource", &payload));
        }
        let element = GeoElement::new(payload, opts, "DynamicTiles")?;
        Ok(Self { element })
    }

    pub fn source(&self) -> &TileSource {
        match self.element.payload() {
            GeoPayload::TileSource(source) => source,
            _ => unreachable!("DynamicTiles payload validated at construction"),
        }
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        if !matches!(element.payload(), GeoPayload::TileSource(_)) {
            return Err(mismatch(
                ElementKind::DynamicTiles,
                "a TileSource",
                element.payload(),
            ));
        }
        Ok(Self { element })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A collection of geographic points.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    element: GeoElement,
    kdims: Vec<Dimension>,
}

impl Points {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        let kdims = container_kdims(ElementKind::Points, &payload)?;
        let element = GeoElement::new(payload, opts, "Points")?;
        Ok(Self { element, kdims })
    }

    pub fn kdims(&self) -> &[Dimension] {
        &self.kdims
    }

    /// The point coordinates, expanding gridded payloads to the cartesian
    /// product of their axes.
    pub fn coords(&self) -> Vec<Coord<f64>> {
        match self.element.payload() {
            GeoPayload::Dataset(Dataset {
                shape: DataShape::Scatter(scatter),
                ..
            }) => scatter.coords().collect(),
            payload => container_grid(payload)
                .map(|grid| {
                    grid.y
                        .points
                        .iter()
                        .flat_map(|&y| grid.x.points.iter().map(move |&x| Coord { x, y }))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        let kdims = container_kdims(ElementKind::Points, element.payload())?;
        Ok(Self { element, kdims })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A 2D field to be discretized into one or more contour levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Contours {
    element: GeoElement,
    kdims: Vec<Dimension>,
    vdim: Dimension,
}

impl Contours {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        let kdims = container_kdims(ElementKind::Contours, &payload)?;
        let vdim = container_vdim(ElementKind::Contours, &payload)?;
        let element = GeoElement::new(payload, opts, "Contours")?;
        Ok(Self {
            element,
            kdims,
            vdim,
        })
    }

    pub fn kdims(&self) -> &[Dimension] {
        &self.kdims
    }

    pub fn vdim(&self) -> &Dimension {
        &self.vdim
    }

    pub fn grid(&self) -> Option<&GridData> {
        container_grid(self.element.payload())
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        let kdims = container_kdims(ElementKind::Contours, element.payload())?;
        let vdim = container_vdim(ElementKind::Contours, element.payload())?;
        Ok(Self {
            element,
            kdims,
            vdim,
        })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A 2D field rendered as a mesh image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    element: GeoElement,
    kdims: Vec<Dimension>,
    vdim: Dimension,
}

impl Image {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        let kdims = container_kdims(ElementKind::Image, &payload)?;
        let vdim = container_vdim(ElementKind::Image, &payload)?;
        let element = GeoElement::new(payload, opts, "Image")?;
        Ok(Self {
            element,
            kdims,
            vdim,
        })
    }

    pub fn kdims(&self) -> &[Dimension] {
        &self.kdims
    }

    pub fn vdim(&self) -> &Dimension {
        &self.vdim
    }

    pub fn grid(&self) -> Option<&GridData> {
        container_grid(self.element.payload())
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        let kdims = container_kdims(ElementKind::Image, element.payload())?;
        let vdim = container_vdim(ElementKind::Image, element.payload())?;
        Ok(Self {
            element,
            kdims,
            vdim,
        })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// A text label anchored at an (x, y) position in some CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    element: GeoElement,
}

impl Text {
    pub fn new(payload: GeoPayload, opts: GeoOptions) -> Result<Self, GeoError> {
        if !matches!(payload, GeoPayload::Annotation(_)) {
            return Err(mismatch(ElementKind::Text, "a TextAnnotation", &payload));
        }
        let element = GeoElement::new(payload, opts, "Text")?;
        Ok(Self { element })
    }

    pub fn annotation(&self) -> &TextAnnotation {
        match self.element.payload() {
            GeoPayload::Annotation(annotation) => annotation,
            _ => unreachable!("Text payload validated at construction"),
        }
    }

    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let element = self.element.clone_with(payload, overrides)?;
        if !matches!(element.payload(), GeoPayload::Annotation(_)) {
            return Err(mismatch(ElementKind::Text, "a TextAnnotation", element.payload()));
        }
        Ok(Self { element })
    }

    pub fn element(&self) -> &GeoElement {
        &self.element
    }
}

/// Any geo element, for kind-based adapter dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGeoElement {
    Feature(Feature),
    TileService(TileService),
    DynamicTiles(DynamicTiles),
    Points(Points),
    Contours(Contours),
    Image(Image),
    Text(Text),
}

impl AnyGeoElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            AnyGeoElement::Feature(_) => ElementKind::Feature,
            AnyGeoElement::TileService(_) => ElementKind::TileService,
            AnyGeoElement::DynamicTiles(_) => ElementKind::DynamicTiles,
            AnyGeoElement::Points(_) => ElementKind::Points,
            AnyGeoElement::Contours(_) => ElementKind::Contours,
            AnyGeoElement::Image(_) => ElementKind::Image,
            AnyGeoElement::Text(_) => ElementKind::Text,
        }
    }

    pub fn element(&self) -> &GeoElement {
        match self {
            AnyGeoElement::Feature(el) => el.element(),
            AnyGeoElement::TileService(el) => el.element(),
            AnyGeoElement::DynamicTiles(el) => el.element(),
            AnyGeoElement::Points(el) => el.element(),
            AnyGeoElement::Contours(el) => el.element(),
            AnyGeoElement::Image(el) => el.element(),
            AnyGeoElement::Text(el) => el.element(),
        }
    }

    pub fn crs(&self) -> Option<&gv_core::Crs> {
        self.element().crs()
    }

    pub fn group(&self) -> &str {
        self.element().group()
    }

    /// The addressing dimensions of the wrapped data, for the container
    /// variants.
    pub fn kdims(&self) -> Option<&[Dimension]> {
        match self {
            AnyGeoElement::Points(el) => Some(el.kdims()),
            AnyGeoElement::Contours(el) => Some(el.kdims()),
            AnyGeoElement::Image(el) => Some(el.kdims()),
            _ => None,
        }
    }
}

impl From<Feature> for AnyGeoElement {
    fn from(el: Feature) -> Self {
        AnyGeoElement::Feature(el)
    }
}

impl From<TileService> for AnyGeoElement {
    fn from(el: TileService) -> Self {
        AnyGeoElement::TileService(el)
    }
}

impl From<DynamicTiles> for AnyGeoElement {
    fn from(el: DynamicTiles) -> Self {
        AnyGeoElement::DynamicTiles(el)
    }
}

impl From<Points> for AnyGeoElement {
    fn from(el: Points) -> Self {
        AnyGeoElement::Points(el)
    }
}

impl From<Contours> for AnyGeoElement {
    fn from(el: Contours) -> Self {
        AnyGeoElement::Contours(el)
    }
}

impl From<Image> for AnyGeoElement {
    fn from(el: Image) -> Self {
        AnyGeoElement::Image(el)
    }
}

impl From<Text> for AnyGeoElement {
    fn from(el: Text) -> Self {
        AnyGeoElement::Text(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{CoordSystem, Crs, GridCoord, ScatterData};

    fn geodetic_grid() -> GridData {
        GridData::new(
            "z",
            GridCoord::new("x", vec![0.0, 1.0, 2.0]),
            GridCoord::new("y", vec![0.0, 1.0]),
            (0..6).map(f64::from).collect(),
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        )
    }

    #[test]
    fn tile_service_requires_a_url() {
        let err = TileService::new(
            GeoPayload::Grid(geodetic_grid()),
            "labels",
            GeoOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            GeoError::TypeMismatch {
                element: "TileService",
                expected: "a tile service URL",
                received: "GridData".to_string(),
            }
        );
    }

    #[test]
    fn tile_service_from_url_has_unset_crs() {
        let service = TileService::new(
            GeoPayload::Url("https://tiles.example/wmts".to_string()),
            "labels",
            GeoOptions::default(),
        )
        .unwrap();
        assert!(service.element().crs().is_none());
        assert_eq!(service.layer(), "labels");
    }

    #[test]
    fn feature_rejects_non_feature_payloads() {
        let err = Feature::new(
            GeoPayload::Url("https://tiles.example".to_string()),
            GeoOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::TypeMismatch { element: "Feature", .. }));
    }

    #[test]
    fn feature_adopts_payload_crs() {
        let feature = Feature::new(
            GeoPayload::Feature(MapFeature::new("coastline", Crs::mercator(), Vec::new())),
            GeoOptions::default(),
        )
        .unwrap();
        assert_eq!(feature.element().crs(), Some(&Crs::mercator()));
    }

    #[test]
    fn dynamic_tiles_requires_a_tile_source() {
        let err = DynamicTiles::new(
            GeoPayload::Url("https://tiles.example".to_string()),
            GeoOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GeoError::TypeMismatch {
                element: "DynamicTiles",
                ..
            }
        ));
    }

    #[test]
    fn contours_requires_exactly_one_value_dimension() {
        let mut dataset = Dataset::from_grid(geodetic_grid());
        dataset.vdims.push(Dimension::new("extra"));
        let err =
            Contours::new(GeoPayload::Dataset(dataset), GeoOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GeoError::TypeMismatch {
                element: "Contours",
                expected: "a container with exactly one value dimension",
                ..
            }
        ));
    }

    #[test]
    fn image_from_grid_uses_coordinate_dimensions() {
        let image = Image::new(GeoPayload::Grid(geodetic_grid()), GeoOptions::default()).unwrap();
        let names: Vec<&str> = image.kdims().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(image.vdim().name, "z");
    }

    #[test]
    fn points_clone_preserves_crs_end_to_end() {
        let points = Points::new(
            GeoPayload::Dataset(Dataset::from_scatter(ScatterData::new(
                vec![-1.5, 2.0],
                vec![51.5, 48.9],
                None,
            ))),
            GeoOptions::with_crs(Crs::plate_carree()),
        )
        .unwrap();
        let cloned = points.clone_with(None, CloneOverrides::default()).unwrap();
        assert_eq!(cloned.element().crs(), points.element().crs());
    }

    #[test]
    fn points_expand_gridded_payloads() {
        let points =
            Points::new(GeoPayload::Grid(geodetic_grid()), GeoOptions::default()).unwrap();
        let coords = points.coords();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(coords[5], Coord { x: 2.0, y: 1.0 });
    }

    #[test]
    fn text_requires_an_annotation() {
        let err = Text::new(
            GeoPayload::Url("not text".to_string()),
            GeoOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::TypeMismatch { element: "Text", .. }));
    }

    #[test]
    fn any_element_reports_kind_and_kdims() {
        let image: AnyGeoElement = Image::new(
            GeoPayload::Grid(geodetic_grid()),
            GeoOptions::default(),
        )
        .unwrap()
        .into();
        assert_eq!(image.kind(), ElementKind::Image);
        assert_eq!(image.kdims().map(|d| d.len()), Some(2));

        let text: AnyGeoElement = Text::new(
            GeoPayload::Annotation(TextAnnotation::new(0.0, 51.0, "London")),
            GeoOptions::with_crs(Crs::plate_carree()),
        )
        .unwrap()
        .into();
        assert_eq!(text.kind(), ElementKind::Text);
        assert!(text.kdims().is_none());
    }
}
