//! Scatter rendering of Points elements.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Draws a scatter plot from the data in a Points element.
#[derive(Debug, Clone)]
pub struct PointPlot {
    base: GeoPlotBase,
}

impl PointPlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
        }
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for PointPlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Points
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        _ranges: &RangeMap,
        mut style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let points = match element {
            AnyGeoElement::Points(points) => points,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::Points,
                    received: other.kind(),
                })
            }
        };
        // Markers are reprojected at draw time from the element's CRS.
        style.transform = element.crs().cloned();
        let args = DrawArgs::Points {
            coords: points.coords(),
        };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let coords = match args {
            DrawArgs::Points { coords } => coords,
            _ => return Err(PlotError::MissingData("point draw arguments")),
        };
        let handle = axis.draw_points(&coords, style)?;
        let mut artists = IndexMap::new();
        artists.insert("artist".to_string(), Artists::One(handle));
        Ok(artists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DrawCall, RecordingBackend};
    use crate::style::compute_ranges;
    use gv_core::{Crs, Dataset, ScatterData};
    use gv_element::{GeoOptions, GeoPayload, Points};

    fn points_element() -> AnyGeoElement {
        Points::new(
            GeoPayload::Dataset(Dataset::from_scatter(ScatterData::new(
                vec![-0.1, 2.35, 13.4],
                vec![51.5, 48.86, 52.5],
                None,
            ))),
            GeoOptions::with_crs(Crs::plate_carree()),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn element_crs_is_injected_as_the_style_transform() {
        let element = points_element();
        let mut plot = PointPlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::mercator(), Box::new(backend));
        plot.render(&mut axis, &element, &compute_ranges(&element)).unwrap();
        assert!(matches!(
            log.last(),
            Some(DrawCall::Points {
                count: 3,
                transform: Some(Crs::PlateCarree { .. }),
                ..
            })
        ));
    }

    #[test]
    fn style_is_returned_modified_not_mutated() {
        let element = points_element();
        let plot = PointPlot::new(ElementInput::Single(&element), PlotOptions::default());
        let original = Style::default();
        let (_, modified, _) = plot
            .get_data(&element, &compute_ranges(&element), original.clone())
            .unwrap();
        assert!(original.transform.is_none());
        assert_eq!(modified.transform, Some(Crs::plate_carree()));
    }
}
