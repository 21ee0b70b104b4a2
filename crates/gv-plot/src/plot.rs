//! The shared plot base: projection resolution, extent transforms, tick
//! installation and artist teardown.

use geo_types::Coord;
use gv_core::{Crs, FrameSequence, GridData, MapFeature, TextAnnotation, TileSource};
use gv_element::{AnyGeoElement, ElementKind};
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::axis::{ArtistHandle, Axis, AxisError};
use crate::style::{extent_from_ranges, Extent, RangeMap, Style};
use crate::ticks::{evenly_spaced, AxisSide, DegreeFormatter, TickState, Ticks};
use crate::PlotError;

/// The element input a plot is constructed for: either a single element or
/// a frame-indexed collection of them.
#[derive(Clone, Copy)]
pub enum ElementInput<'a> {
    Single(&'a AnyGeoElement),
    Frames(&'a FrameSequence<AnyGeoElement>),
}

impl<'a> ElementInput<'a> {
    /// The element whose CRS drives projection resolution: the element
    /// itself, or the last frame of a collection.
    pub fn last(&self) -> Option<&'a AnyGeoElement> {
        match self {
            ElementInput::Single(element) => Some(element),
            ElementInput::Frames(frames) => frames.last(),
        }
    }
}

/// Options recognized by every plot adapter.
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Display projection. Resolved from the element's CRS when absent.
    pub projection: Option<Crs>,
    /// Drawing order; layer 0 is the bottom-most.
    pub zorder: usize,
    pub xticks: Option<Ticks>,
    pub yticks: Option<Ticks>,
    /// Rotation in degrees applied to every generated x tick label.
    pub xrotation: f64,
    /// Rotation in degrees applied to every generated y tick label.
    pub yrotation: f64,
    pub style: Style,
}

/// Named artist handles created during a draw pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Artists {
    One(ArtistHandle),
    Many(Vec<ArtistHandle>),
}

impl Artists {
    pub fn handles(&self) -> Vec<ArtistHandle> {
        match self {
            Artists::One(handle) => vec![*handle],
            Artists::Many(handles) => handles.clone(),
        }
    }
}

/// Backend-specific draw arguments produced by `get_data`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawArgs {
    Contour {
        grid: GridData,
        levels: Option<usize>,
        filled: bool,
    },
    Mesh {
        grid: GridData,
    },
    Points {
        coords: Vec<Coord<f64>>,
    },
    Feature {
        feature: MapFeature,
    },
    Wmts {
        url: String,
        layer: String,
    },
    Image {
        source: TileSource,
        zoom: u32,
    },
    Text {
        anchor: Coord<f64>,
        annotation: TextAnnotation,
    },
}

/// Axis-level keyword options returned by `get_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    /// Aspect ratio installed on the axis; geographic plots use "equal".
    pub aspect: Option<String>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            aspect: Some("equal".to_string()),
        }
    }
}

/// Shared state of every geo plot adapter.
#[derive(Debug, Clone)]
pub struct GeoPlotBase {
    /// Resolved display projection.
    pub projection: Crs,
    pub opts: PlotOptions,
    /// Artist handles created by the last draw pass.
    pub handles: IndexMap<String, Artists>,
}

impl GeoPlotBase {
    /// Resolves the display projection: the explicit option if given, else
    /// the element's CRS (last frame for collections), else the standard
    /// geodetic projection.
    pub fn new(input: ElementInput<'_>, opts: PlotOptions) -> Self {
        let projection = opts
            .projection
            .clone()
            .or_else(|| input.last().and_then(|el| el.crs().cloned()))
            .unwrap_or_default();
        Self {
            projection,
            opts,
            handles: IndexMap::new(),
        }
    }

    pub fn zorder(&self) -> usize {
        self.opts.zorder
    }

    /// Transforms a base extent into the display projection.
    ///
    /// The extent passes through unchanged when the element has no CRS,
    /// when its addressing dimensions are not exactly 2, or when the
    /// display projection equals the element's CRS. Otherwise the
    /// (left, bottom) and (right, top) corners are transformed
    /// independently; a corner with no defined image has both of its
    /// coordinates set to NaN instead of failing the redraw. Cylindrical
    /// display projections additionally shift both horizontal values by
    /// -180 to match their native domain convention.
    pub fn get_extents(&self, element: &AnyGeoElement, base: Extent) -> Extent {
        let crs = match element.crs() {
            Some(crs) => crs,
            None => return base,
        };
        match element.kdims() {
            Some(kdims) if kdims.len() == 2 => {}
            _ => return base,
        }
        if &self.projection == crs {
            return base;
        }

        let corner = |x: f64, y: f64| match self.projection.transform_from(crs, Coord { x, y }) {
            Ok(point) => (point.x, point.y),
            Err(err) => {
                warn!(%err, x, y, "extent corner has no image in the display projection");
                (f64::NAN, f64::NAN)
            }
        };
        let (mut left, bottom) = corner(base.left, base.bottom);
        let (mut right, top) = corner(base.right, base.top);
        if self.projection.is_cylindrical() {
            left -= 180.0;
            right -= 180.0;
        }
        Extent::new(left, bottom, right, top)
    }

    /// Installs one axis side's ticks from its specification.
    pub fn set_axis_ticks(&self, axis: &mut Axis, side: AxisSide, ticks: &Ticks, rotation: f64) {
        let state = match ticks {
            Ticks::Count(0) | Ticks::Hidden => TickState::Cleared,
            Ticks::Count(n) => {
                let (lo, hi) = axis.limits(side);
                TickState::Fixed {
                    positions: evenly_spaced(lo, hi, *n),
                    labels: None,
                    formatter: Some(DegreeFormatter { side }),
                    rotation,
                }
            }
            Ticks::Locator(locator) => TickState::Locator {
                locator: locator.clone(),
                rotation,
            },
            Ticks::Positions(positions) if positions.is_empty() => TickState::Cleared,
            Ticks::Positions(positions) => TickState::Fixed {
                positions: positions.clone(),
                labels: None,
                formatter: Some(DegreeFormatter { side }),
                rotation,
            },
            Ticks::Labelled(pairs) if pairs.is_empty() => TickState::Cleared,
            Ticks::Labelled(pairs) => TickState::Fixed {
                positions: pairs.iter().map(|(p, _)| *p).collect(),
                labels: Some(pairs.iter().map(|(_, l)| l.clone()).collect()),
                formatter: None,
                rotation,
            },
        };
        axis.set_ticks(side, state);
    }

    /// Applies both configured tick specifications.
    pub fn apply_ticks(&self, axis: &mut Axis) {
        if let Some(xticks) = self.opts.xticks.clone() {
            self.set_axis_ticks(axis, AxisSide::X, &xticks, self.opts.xrotation);
        }
        if let Some(yticks) = self.opts.yticks.clone() {
            self.set_axis_ticks(axis, AxisSide::Y, &yticks, self.opts.yrotation);
        }
    }

    /// Applies the element's extent to the axis, reprojected into the
    /// display projection. NaN-masked coordinates keep the axis's current
    /// limit for that side.
    pub fn apply_extents(&self, axis: &mut Axis, element: &AnyGeoElement, ranges: &RangeMap) {
        let base = match element.kdims().and_then(|kdims| extent_from_ranges(kdims, ranges)) {
            Some(base) => base,
            None => return,
        };
        let extent = self.get_extents(element, base);
        let xlim = axis.limits(AxisSide::X);
        let ylim = axis.limits(AxisSide::Y);
        let keep = |v: f64, current: f64| if v.is_finite() { v } else { current };
        axis.set_limits(
            (keep(extent.left, xlim.0), keep(extent.right, xlim.1)),
            (keep(extent.bottom, ylim.0), keep(extent.top, ylim.1)),
        );
    }

    /// Serializes the base plot options.
    pub fn save_config(&self) -> Value {
        json!({
            "projection": self.projection,
            "zorder": self.opts.zorder,
            "xrotation": self.opts.xrotation,
            "yrotation": self.opts.yrotation,
            "style": self.opts.style,
        })
    }

    /// Restores the base plot options, ignoring missing or mistyped keys.
    pub fn load_config(&mut self, config: &Value) {
        if let Some(projection) = config
            .get("projection")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
        {
            self.projection = projection;
        }
        if let Some(zorder) = config.get("zorder").and_then(Value::as_u64) {
            self.opts.zorder = zorder as usize;
        }
        if let Some(rotation) = config.get("xrotation").and_then(Value::as_f64) {
            self.opts.xrotation = rotation;
        }
        if let Some(rotation) = config.get("yrotation").and_then(Value::as_f64) {
            self.opts.yrotation = rotation;
        }
        if let Some(style) = config
            .get("style")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
        {
            self.opts.style = style;
        }
    }

    /// Removes the artists created by the previous draw pass. Removal of an
    /// already-detached artist is swallowed, not surfaced.
    pub fn teardown_handles(&mut self, axis: &mut Axis) {
        for (name, artists) in std::mem::take(&mut self.handles) {
            for handle in artists.handles() {
                match axis.remove_artist(handle) {
                    Ok(()) => {}
                    Err(AxisError::StaleArtist(_)) => {
                        debug!(name, ?handle, "skipping removal of detached artist");
                    }
                }
            }
        }
    }
}

/// Base trait shared by every geo plot adapter.
pub trait ElementPlot {
    fn base(&self) -> &GeoPlotBase;
    fn base_mut(&mut self) -> &mut GeoPlotBase;

    /// The element kind this adapter renders.
    fn kind(&self) -> ElementKind;

    /// Builds backend draw arguments from the element's payload, returning
    /// the (possibly modified) style rather than mutating shared state.
    fn get_data(
        &self,
        element: &AnyGeoElement,
        ranges: &RangeMap,
        style: Style,
    ) -> Result<(DrawArgs, Style, AxisOptions), PlotError>;

    /// Invokes the draw primitive and records the created artists.
    fn init_artists(
        &self,
        axis: &mut Axis,
        args: DrawArgs,
        style: &Style,
    ) -> Result<IndexMap<String, Artists>, PlotError>;

    /// Removes the artists of the previous draw pass.
    fn teardown(&mut self, axis: &mut Axis) {
        self.base_mut().teardown_handles(axis);
    }

    /// One full draw pass: teardown, extent reprojection, data extraction,
    /// drawing, ticks.
    fn render(
        &mut self,
        axis: &mut Axis,
        element: &AnyGeoElement,
        ranges: &RangeMap,
    ) -> Result<(), PlotError> {
        if element.kind() != self.kind() {
            return Err(PlotError::ElementMismatch {
                expected: self.kind(),
                received: element.kind(),
            });
        }
        self.teardown(axis);
        self.base().apply_extents(axis, element, ranges);
        let style = self.base().opts.style.clone();
        let (args, style, axis_opts) = self.get_data(element, ranges, style)?;
        if let Some(aspect) = axis_opts.aspect {
            axis.set_aspect(aspect);
        }
        let artists = self.init_artists(axis, args, &style)?;
        self.base_mut().handles.extend(artists);
        self.base().apply_ticks(axis);
        Ok(())
    }

    fn save_config(&self) -> Value {
        self.base().save_config()
    }

    fn load_config(&mut self, config: Value) {
        self.base_mut().load_config(&config);
    }
}
