//! Filled and unfilled contour rendering.

use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::axis::Axis;
use crate::plot::{Artists, AxisOptions, DrawArgs, ElementInput, ElementPlot, GeoPlotBase, PlotOptions};
use crate::style::{RangeMap, Style};
use crate::PlotError;

/// Contour level specification: a count or an explicit list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Levels {
    Count(usize),
    Explicit(Vec<f64>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Count(5)
    }
}

/// Draws a contour or contourf plot from a Contours element.
#[derive(Debug, Clone)]
pub struct ContourPlot {
    base: GeoPlotBase,
    /// Whether to draw filled or unfilled contours.
    pub filled: bool,
    pub levels: Levels,
}

impl ContourPlot {
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        Self {
            base: GeoPlotBase::new(input, opts),
            filled: true,
            levels: Levels::default(),
        }
    }

    pub fn with_levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn boxed(input: ElementInput<'_>, opts: PlotOptions) -> Box<dyn ElementPlot> {
        Box::new(Self::new(input, opts))
    }
}

impl ElementPlot for ContourPlot {
    fn base(&self) -> &GeoPlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeoPlotBase {
        &mut self.base
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Contours
    }

    fn get_data(
        &self,
        element: &AnyGeoElement,
        ranges: &RangeMap,
        mut style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError> {
        let contours = match element {
            AnyGeoElement::Contours(contours) => contours,
            other => {
                return Err(PlotError::ElementMismatch {
                    expected: ElementKind::Contours,
                    received: other.kind(),
                })
            }
        };
        let grid = contours
            .grid()
            .ok_or(PlotError::MissingData("a gridded field"))?
            .clone();
        if style.clim.is_none() {
            style.clim = ranges
                .get(&contours.vdim().name)
                .copied()
                .or_else(|| grid.value_range());
        }
        let levels = match &self.levels {
            Levels::Count(count) => Some(*count),
            Levels::Explicit(values) => {
                style.levels = Some(values.clone());
                None
            }
        };
        let args = DrawArgs::Contour {
            grid,
            levels,
            filled: self.filled,
        };
        Ok((args, style, AxisOptions::default()))
    }

    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError> {
        let (grid, levels, filled) = match args {
            DrawArgs::Contour {
                grid,
                levels,
                filled,
            } => (grid, levels, filled),
            _ => return Err(PlotError::MissingData("contour draw arguments")),
        };
        let handle = axis.draw_contour(&grid, levels, filled, style)?;
        let mut artists = IndexMap::new();
        artists.insert("artist".to_string(), Artists::One(handle));
        Ok(artists)
    }

    fn save_config(&self) -> Value {
        let mut config = self.base.save_config();
        config["filled"] = json!(self.filled);
        match &self.levels {
            Levels::Count(count) => config["level_count"] = json!(count),
            Levels::Explicit(values) => config["levels"] = json!(values),
        }
        config
    }

    fn load_config(&mut self, config: Value) {
        self.base.load_config(&config);
        if let Some(filled) = config.get("filled").and_then(Value::as_bool) {
            self.filled = filled;
        }
        if let Some(values) = config.get("levels").and_then(Value::as_array) {
            self.levels = Levels::Explicit(values.iter().filter_map(Value::as_f64).collect());
        } else if let Some(count) = config.get("level_count").and_then(Value::as_u64) {
            self.levels = Levels::Count(count as usize);
        }
    }

    /// The backend cannot incrementally update contour fills, so the
    /// bottom-most layer clears the whole rendering context instead of
    /// removing its own artist.
    fn teardown(&mut self, axis: &mut Axis) {
        if self.base.zorder() == 0 {
            axis.clear();
            self.base.handles.clear();
        } else {
            self.base.teardown_handles(axis);
        }
    }
}
