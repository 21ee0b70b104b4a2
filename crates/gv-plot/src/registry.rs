//! Explicit backend registry mapping element kinds to plot adapters.

use ahash::AHashMap;
use gv_element::ElementKind;
use once_cell::sync::Lazy;

use crate::plot::{ElementInput, ElementPlot, PlotOptions};
use crate::plots::{
    ContourPlot, FeaturePlot, ImagePlot, PointPlot, TextPlot, TilePlot, WmtsPlot,
};

/// Name of the built-in rendering backend.
pub const BACKEND: &str = "canvas";

type PlotCtor = fn(ElementInput<'_>, PlotOptions) -> Box<dyn ElementPlot>;

static REGISTRY: Lazy<AHashMap<&'static str, AHashMap<ElementKind, PlotCtor>>> =
    Lazy::new(|| {
        let mut kinds: AHashMap<ElementKind, PlotCtor> = AHashMap::new();
        kinds.insert(ElementKind::Feature, FeaturePlot::boxed);
        kinds.insert(ElementKind::TileService, WmtsPlot::boxed);
        kinds.insert(ElementKind::DynamicTiles, TilePlot::boxed);
        kinds.insert(ElementKind::Points, PointPlot::boxed);
        kinds.insert(ElementKind::Contours, ContourPlot::boxed);
        kinds.insert(ElementKind::Image, ImagePlot::boxed);
        kinds.insert(ElementKind::Text, TextPlot::boxed);

        let mut backends = AHashMap::new();
        backends.insert(BACKEND, kinds);
        backends
    });

/// Constructs the plot adapter registered for an element kind on a backend.
pub fn plot_for(
    backend: &str,
    kind: ElementKind,
    input: ElementInput<'_>,
    opts: PlotOptions,
) -> Option<Box<dyn ElementPlot>> {
    let ctor = REGISTRY.get(backend)?.get(&kind)?;
    Some(ctor(input, opts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{Crs, TextAnnotation};
    use gv_element::{AnyGeoElement, GeoOptions, GeoPayload, Text};

    fn text_element() -> AnyGeoElement {
        Text::new(
            GeoPayload::Annotation(TextAnnotation::new(0.0, 0.0, "label")),
            GeoOptions::with_crs(Crs::plate_carree()),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn every_element_kind_resolves_to_an_adapter() {
        let element = text_element();
        let kinds = [
            ElementKind::Feature,
            ElementKind::TileService,
            ElementKind::DynamicTiles,
            ElementKind::Points,
            ElementKind::Contours,
            ElementKind::Image,
            ElementKind::Text,
        ];
        for kind in kinds {
            let plot = plot_for(
                BACKEND,
                kind,
                ElementInput::Single(&element),
                PlotOptions::default(),
            );
            assert_eq!(plot.map(|p| p.kind()), Some(kind));
        }
    }

    #[test]
    fn unknown_backend_resolves_to_nothing() {
        let element = text_element();
        assert!(plot_for(
            "terminal",
            ElementKind::Text,
            ElementInput::Single(&element),
            PlotOptions::default(),
        )
        .is_none());
    }
}
