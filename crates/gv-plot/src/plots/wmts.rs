//! Rendering of Web Map Tile Service layers.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Adds a Web Map Tile Service layer from a TileService element.
#[derive(Debug, Clone)]
pub struct WmtsPlot {
    base: GeoPlotBase,
}

impl WmtsPlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
        }
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for WmtsPlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::TileService
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        _ranges: &RangeMap,
        style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let service = match element {
            AnyGeoElement::TileService(service) => service,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::TileService,
                    received: other.kind(),
                })
            }
        };
        let args = DrawArgs::Wmts {
            url: service.url().to_string(),
            layer: service.layer().to_string(),
        };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let (url, layer) = match args {
            DrawArgs::Wmts { url, layer } => (url, layer),
            _ => return Err(PlotError::MissingData("tile service draw arguments")),
        };
        let handle = axis.add_wmts(&url, &layer, style)?;
        let mut artists = IndexMap::new();
        artists.insert("artist".to_string(), Artists::One(handle));
        Ok(artists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DrawCall, RecordingBackend};
    use gv_core::Crs;
    use gv_element::{GeoOptions, GeoPayload, TileService};

    #[test]
    fn url_and_layer_are_passed_through() {
        let element: AnyGeoElement = TileService::new(
            GeoPayload::Url("https://tiles.example/wmts".to_string()),
            "night_lights",
            GeoOptions::default(),
        )
        .unwrap()
        .into();
        let mut plot = WmtsPlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::plate_carree(), Box::new(backend));
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        match log.last() {
            Some(DrawCall::Wmts { url, layer, .. }) => {
                assert_eq!(url, "https://tiles.example/wmts");
                assert_eq!(layer, "night_lights");
            }
            call => panic!("unexpected draw call {call:?}"),
        }
    }
}
