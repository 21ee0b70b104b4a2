//! Rendering of static cartographic features.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Draws a feature from a Feature element.
#[derive(Debug, Clone)]
pub struct FeaturePlot {
    base: GeoPlotBase,
}

impl FeaturePlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
        }
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for FeaturePlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Feature
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        _ranges: &RangeMap,
        style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let feature = match element {
            AnyGeoElement::Feature(feature) => feature,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::Feature,
                    received: other.kind(),
                })
            }
        };
        let args = DrawArgs::Feature {
            feature: feature.feature().clone(),
        };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let feature = match args {
            DrawArgs::Feature { feature } => feature,
            _ => return Err(PlotError::MissingData("feature draw arguments")),
        };
        let handle = axis.add_feature(&feature, style)?;
        let mut artists = IndexMap::new();
        artists.insert("artist".to_string(), Artists::One(handle));
        Ok(artists)
    }
}
