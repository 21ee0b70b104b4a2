//! Rendering of zoom-dependent tile sources.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

const DEFAULT_ZOOM: u32 = 8;

/// Adds a tile image from a DynamicTiles element at a fixed zoom level.
#[derive(Debug, Clone)]
pub struct TilePlot {
    base: GeoPlotBase,
    /// Zoom level the tile image is fetched at.
    pub zoom: u32,
}

impl TilePlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for TilePlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::DynamicTiles
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        _ranges: &RangeMap,
        style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let tiles = match element {
            AnyGeoElement::DynamicTiles(tiles) => tiles,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::DynamicTiles,
                    received: other.kind(),
                })
            }
        };
        let args = DrawArgs::Image {
            source: tiles.source().clone(),
            zoom: self.zoom,
        };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let (source, zoom) = match args {
            DrawArgs::Image { source, zoom } => (source, zoom),
            _ => return Err(PlotError::MissingData("tile draw arguments")),
        };
        let handle = axis.add_image(&source, zoom, style)?;
        let mut artists = IndexMap::new();
        artists.insert("artist".to_string(), Artists::One(handle));
        Ok(artists)
    }

    fn save_config(&self) -> Value {
        let mut config = self.base.save_config();
        config["zoom"] = json!(self.zoom);
        config
    }

    fn load_config(&mut self, config: Value) {
        self.base.load_config(&config);
        if let Some(zoom) = config.get("zoom").and_then(Value::as_u64) {
            self.zoom = zoom as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DrawCall, RecordingBackend};
    use gv_core::{Crs, TileSource};
    use gv_element::{DynamicTiles, GeoOptions, GeoPayload};

    fn tiles_element() -> AnyGeoElement {
        DynamicTiles::new(
            GeoPayload::TileSource(TileSource::new(
                "osm",
                Crs::mercator(),
                "https://tiles.example/{z}/{x}/{y}.png",
            )),
            GeoOptions::default(),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn default_zoom_is_used_when_unspecified() {
        let element = tiles_element();
        let mut plot = TilePlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::mercator(), Box::new(backend));
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        assert!(matches!(
            log.last(),
            Some(DrawCall::Image { zoom: 8, .. })
        ));
    }

    #[test]
    fn explicit_zoom_reaches_the_draw_primitive() {
        let element = tiles_element();
        let mut plot = TilePlot::new(ElementInput::Single(&element), PlotOptions::default())
            .with_zoom(12);
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::mercator(), Box::new(backend));
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        match log.last() {
            Some(DrawCall::Image { name, zoom, .. }) => {
                assert_eq!(name, "osm");
                assert_eq!(zoom, 12);
            }
            call => panic!("unexpected draw call {call:?}"),
        }
    }

    #[test]
    fn config_round_trip_preserves_zoom() {
        let element = tiles_element();
        let plot = TilePlot::new(ElementInput::Single(&element), PlotOptions::default())
            .with_zoom(12);
        let config = plot.save_config();
        let mut restored = TilePlot::new(ElementInput::Single(&element), PlotOptions::default());
        restored.load_config(config);
        assert_eq!(restored.zoom, 12);
    }

    #[test]
    fn projection_resolves_from_the_tile_source_crs() {
        let element = tiles_element();
        let plot = TilePlot::new(ElementInput::Single(&element), PlotOptions::default());
        assert_eq!(plot.base().projection, Crs::mercator());
    }
}
