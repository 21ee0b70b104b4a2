//! Mesh rendering of gridded Image elements.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Draws a color mesh from the data in an Image element.
#[derive(Debug, Clone)]
pub struct ImagePlot {
    base: GeoPlotBase,
}

impl ImagePlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
        }
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for ImagePlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Image
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        ranges: &RangeMap,
        mut style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let image = match element {
            AnyGeoElement::Image(image) => image,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::Image,
                    received: other.kind(),
                })
            }
        };
        let grid = image
            .grid()
            .ok_or(PlotError::MissingData("a gridded field"))?
            .clone();
        if style.clim.is_none() {
            style.clim = ranges
                .get(&image.vdim().name)
                .copied()
                .or_else(|| grid.value_range());
        }
        Ok((DrawArgs::Mesh { grid }, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let grid = match args {
            DrawArgs::Mesh { grid } => grid,
            _ => return Err(PlotError::MissingData("mesh draw arguments")),
        };
        let handle = axis.draw_mesh(&grid, style)?;
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
    use gv_core::{CoordSystem, Crs, GridCoord, GridData};
    use gv_element::{GeoOptions, GeoPayload, Image};

    fn image_element() -> AnyGeoElement {
        let grid = GridData::new(
            "temperature",
            GridCoord::new("x", vec![0.0, 1.0]),
            GridCoord::new("y", vec![0.0, 1.0]),
            vec![250.0, 260.0, 270.0, 280.0],
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        );
        Image::new(GeoPayload::Grid(grid), GeoOptions::default())
            .unwrap()
            .into()
    }

    #[test]
    fn mesh_draw_carries_value_normalization() {
        let element = image_element();
        let mut plot = ImagePlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::plate_carree(), Box::new(backend));
        plot.render(&mut axis, &element, &compute_ranges(&element)).unwrap();
        assert!(matches!(
            log.last(),
            Some(DrawCall::Mesh {
                clim: Some((250.0, 280.0)),
                ..
            })
        ));
        assert_eq!(plot.base().handles.len(), 1);
    }

    #[test]
    fn redraw_replaces_the_previous_artist() {
        let element = image_element();
        let mut plot = ImagePlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (backend, log) = RecordingBackend::new();
        let mut axis = Axis::new(Crs::plate_carree(), Box::new(backend));
        let ranges = compute_ranges(&element);
        plot.render(&mut axis, &element, &ranges).unwrap();
        plot.render(&mut axis, &element, &ranges).unwrap();
        let removals = log
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Remove { .. }))
            .count();
        assert_eq!(removals, 1);
        assert_eq!(axis.artist_count(), 1);
    }
}
