//! Rendering of anchored text labels.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Draws a text label from a Text element.
///
/// The anchor is reprojected into the display projection before drawing.
/// Unlike extent corners, an anchor with no image in the display projection
/// fails the redraw.
#[derive(Debug, Clone)]
pub struct TextPlot {
    base: GeoPlotBase,
}

impl TextPlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
        }
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for TextPlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Text
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        _ranges: &RangeMap,
        style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let text = match element {
            AnyGeoElement::Text(text) => text,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::Text,
                    received: other.kind(),
                })
            }
        };
        let annotation = text.annotation().clone();
        let anchor = match element.crs() {
            Some(crs) => self.base.projection.transform_from(crs, annotation.anchor())?,
            None => annotation.anchor(),
        };
        let args = DrawArgs::Text { anchor, annotation };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let (anchor, annotation) = match args {
            DrawArgs::Text { anchor, annotation } => (anchor, annotation),
            _ => return Err(PlotError::MissingData("text draw arguments")),
        };
        let handle = axis.draw_text(anchor, &annotation, style)?;
        let mut artists = IndexMap::new();
        artists.insert("annotations".to_string(), Artists::Many(vec![handle]));
        Ok(artists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DrawCall, RecordingBackend};
    use gv_core::{Crs, TextAnnotation};
    use gv_element::{GeoOptions, GeoPayload, Text};

    fn text_element(x: f64, y: f64, label: &str) -> AnyGeoElement {
        Text::new(
            GeoPayload::Annotation(TextAnnotation::new(x, y, label).with_rotation(30.0)),
            GeoOptions::with_crs(Crs::plate_carree()),
        )
        .unwrap()
        .into()
    }

    fn axis(projection: Crs) -> (Axis, crate::axis::DrawLog) {
        let (backend, log) = RecordingBackend::new();
        (Axis::new(projection, Box::new(backend)), log)
    }

    #[test]
    fn text_and_rotation_reach_the_draw_primitive() {
        let element = text_element(-0.1, 51.5, "London");
        let mut plot = TextPlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (mut axis, log) = axis(Crs::plate_carree());
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        match log.last() {
            Some(DrawCall::Text {
                anchor,
                text,
                rotation,
                ..
            }) => {
                assert_eq!(text, "London");
                assert_eq!(rotation, 30.0);
                assert_eq!(anchor.x, -0.1);
                assert_eq!(anchor.y, 51.5);
            }
            call => panic!("unexpected draw call {call:?}"),
        }
    }

    #[test]
    fn redraw_replaces_the_previous_annotation() {
        let element = text_element(2.35, 48.86, "Paris");
        let mut plot = TextPlot::new(ElementInput::Single(&element), PlotOptions::default());
        let (mut axis, log) = axis(Crs::plate_carree());
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        let removals = log
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Remove { .. }))
            .count();
        assert_eq!(removals, 1);
        assert_eq!(axis.artist_count(), 1);
    }

    #[test]
    fn undefined_anchor_fails_the_redraw() {
        // Far-hemisphere anchor under an orthographic display.
        let element = text_element(-10.0, 30.0, "hidden");
        let mut plot = TextPlot::new(
            ElementInput::Single(&element),
            PlotOptions {
                projection: Some(Crs::orthographic(180.0, 45.0)),
                ..PlotOptions::default()
            },
        );
        let (mut axis, _log) = axis(Crs::orthographic(180.0, 45.0));
        let err = plot
            .render(&mut axis, &element, &RangeMap::new())
            .unwrap_err();
        assert!(matches!(err, PlotError::AnchorTransform(_)));
        assert_eq!(axis.artist_count(), 0);
    }

    #[test]
    fn anchor_without_a_crs_is_drawn_as_given() {
        let element: AnyGeoElement = Text::new(
            GeoPayload::Annotation(TextAnnotation::new(0.25, 0.75, "corner")),
            GeoOptions::default(),
        )
        .unwrap()
        .into();
        let mut plot = TextPlot::new(
            ElementInput::Single(&element),
            PlotOptions {
                projection: Some(Crs::mercator()),
                ..PlotOptions::default()
            },
        );
        let (mut axis, log) = axis(Crs::mercator());
        plot.render(&mut axis, &element, &RangeMap::new()).unwrap();
        assert!(matches!(
            log.last(),
            Some(DrawCall::Text { anchor, .. }) if anchor.x == 0.25 && anchor.y == 0.75
        ));
    }
}
