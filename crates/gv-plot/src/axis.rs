//! The rendering context and its opaque draw primitives.
//!
//! [`Axis`] is the single-writer rendering context the plot adapters draw
//! into: it carries the display projection, axis limits and tick state, and
//! tracks which artists are currently attached. The actual drawing is
//! delegated to an opaque [`DrawBackend`]; [`RecordingBackend`] is the
//! in-memory implementation used by the demo binary and the tests.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashSet;
use geo_types::Coord;
use gv_core::{Crs, GridData, MapFeature, TextAnnotation, TileSource};
use thiserror::Error;

use crate::style::Style;
use crate::ticks::{AxisSide, TickState};

/// Opaque handle to a drawn graphical primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtistHandle(u64);

/// Errors raised by artist management.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisError {
    /// The artist was already detached from this axis.
    #[error("artist {0:?} is not attached to this axis")]
    StaleArtist(ArtistHandle),
}

/// The low-level draw primitives, treated as an external collaborator.
pub trait DrawBackend {
    fn contour(
        &mut self,
        handle: ArtistHandle,
        grid: &GridData,
        levels: Option<usize>,
        filled: bool,
        style: &Style,
    ) -> anyhow::Result<()>;

    fn mesh(&mut self, handle: ArtistHandle, grid: &GridData, style: &Style) -> anyhow::Result<()>;

    fn points(
        &mut self,
        handle: ArtistHandle,
        coords: &[Coord<f64>],
        style: &Style,
    ) -> anyhow::Result<()>;

    fn feature(
        &mut self,
        handle: ArtistHandle,
        feature: &MapFeature,
        style: &Style,
    ) -> anyhow::Result<()>;

    fn wmts(
        &mut self,
        handle: ArtistHandle,
        url: &str,
        layer: &str,
        style: &Style,
    ) -> anyhow::Result<()>;

    fn image(
        &mut self,
        handle: ArtistHandle,
        source: &TileSource,
        zoom: u32,
        style: &Style,
    ) -> anyhow::Result<()>;

    fn text(
        &mut self,
        handle: ArtistHandle,
        anchor: Coord<f64>,
        annotation: &TextAnnotation,
        style: &Style,
    ) -> anyhow::Result<()>;

    fn remove(&mut self, handle: ArtistHandle);

    fn clear(&mut self);
}

/// A rendering context with a fixed display projection.
pub struct Axis {
    pub projection: Crs,
    xlim: (f64, f64),
    ylim: (f64, f64),
    xticks: TickState,
    yticks: TickState,
    aspect: Option<String>,
    next_artist: u64,
    live: AHashSet<ArtistHandle>,
    backend: Box<dyn DrawBackend>,
}

impl Axis {
    pub fn new(projection: Crs, backend: Box<dyn DrawBackend>) -> Self {
        Self {
            projection,
            xlim: (-180.0, 180.0),
            ylim: (-90.0, 90.0),
            xticks: TickState::Auto,
            yticks: TickState::Auto,
            aspect: None,
            next_artist: 0,
            live: AHashSet::new(),
            backend,
        }
    }

    pub fn set_limits(&mut self, xlim: (f64, f64), ylim: (f64, f64)) {
        self.xlim = xlim;
        self.ylim = ylim;
    }

    pub fn limits(&self, side: AxisSide) -> (f64, f64) {
        match side {
            AxisSide::X => self.xlim,
            AxisSide::Y => self.ylim,
        }
    }

    pub fn set_ticks(&mut self, side: AxisSide, state: TickState) {
        match side {
            AxisSide::X => self.xticks = state,
            AxisSide::Y => self.yticks = state,
        }
    }

    pub fn ticks(&self, side: AxisSide) -> &TickState {
        match side {
            AxisSide::X => &self.xticks,
            AxisSide::Y => &self.yticks,
        }
    }

    pub fn set_aspect(&mut self, aspect: impl Into<String>) {
        self.aspect = Some(aspect.into());
    }

    pub fn aspect(&self) -> Option<&str> {
        self.aspect.as_deref()
    }

    pub fn artist_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_attached(&self, handle: ArtistHandle) -> bool {
        self.live.contains(&handle)
    }

    fn alloc(&mut self) -> ArtistHandle {
        let handle = ArtistHandle(self.next_artist);
        self.next_artist += 1;
        handle
    }

    /// Detaches a previously drawn artist.
    pub fn remove_artist(&mut self, handle: ArtistHandle) -> Result<(), AxisError> {
        if !self.live.remove(&handle) {
            return Err(AxisError::StaleArtist(handle));
        }
        self.backend.remove(handle);
        Ok(())
    }

    /// Clears the whole rendering context, detaching every artist.
    pub fn clear(&mut self) {
        self.backend.clear();
        self.live.clear();
    }

    pub fn draw_contour(
        &mut self,
        grid: &GridData,
        levels: Option<usize>,
        filled: bool,
        style: &Style,
    ) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.contour(handle, grid, levels, filled, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn draw_mesh(&mut self, grid: &GridData, style: &Style) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.mesh(handle, grid, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn draw_points(
        &mut self,
        coords: &[Coord<f64>],
        style: &Style,
    ) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.points(handle, coords, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn add_feature(
        &mut self,
        feature: &MapFeature,
        style: &Style,
    ) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.feature(handle, feature, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn add_wmts(&mut self, url: &str, layer: &str, style: &Style) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.wmts(handle, url, layer, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn add_image(
        &mut self,
        source: &TileSource,
        zoom: u32,
        style: &Style,
    ) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.image(handle, source, zoom, style)?;
        self.live.insert(handle);
        Ok(handle)
    }

    pub fn draw_text(
        &mut self,
        anchor: Coord<f64>,
        annotation: &TextAnnotation,
        style: &Style,
    ) -> anyhow::Result<ArtistHandle> {
        let handle = self.alloc();
        self.backend.text(handle, anchor, annotation, style)?;
        self.live.insert(handle);
        Ok(handle)
    }
}

/// A draw primitive invocation recorded by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Contour {
        handle: ArtistHandle,
        levels: Option<usize>,
        filled: bool,
        explicit_levels: Option<Vec<f64>>,
    },
    Mesh {
        handle: ArtistHandle,
        clim: Option<(f64, f64)>,
    },
    Points {
        handle: ArtistHandle,
        count: usize,
        transform: Option<Crs>,
    },
    Feature {
        handle: ArtistHandle,
        name: String,
    },
    Wmts {
        handle: ArtistHandle,
        url: String,
        layer: String,
    },
    Image {
        handle: ArtistHandle,
        name: String,
        zoom: u32,
    },
    Text {
        handle: ArtistHandle,
        anchor: Coord<f64>,
        text: String,
        rotation: f64,
    },
    Remove {
        handle: ArtistHandle,
    },
    Clear,
}

/// Shared log of recorded draw calls.
#[derive(Debug, Clone, Default)]
pub struct DrawLog(Rc<RefCell<Vec<DrawCall>>>);

impl DrawLog {
    pub fn calls(&self) -> Vec<DrawCall> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<DrawCall> {
        self.0.borrow().last().cloned()
    }

    fn push(&self, call: DrawCall) {
        self.0.borrow_mut().push(call);
    }
}

/// A [`DrawBackend`] that records every primitive invocation.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: DrawLog,
}

impl RecordingBackend {
    pub fn new() -> (Self, DrawLog) {
        let backend = Self::default();
        let log = backend.log.clone();
        (backend, log)
    }
}

impl DrawBackend for RecordingBackend {
    fn contour(
        &mut self,
        handle: ArtistHandle,
        _grid: &GridData,
        levels: Option<usize>,
        filled: bool,
        style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Contour {
            handle,
            levels,
            filled,
            explicit_levels: style.levels.clone(),
        });
        Ok(())
    }

    fn mesh(&mut self, handle: ArtistHandle, _grid: &GridData, style: &Style) -> anyhow::Result<()> {
        self.log.push(DrawCall::Mesh {
            handle,
            clim: style.clim,
        });
        Ok(())
    }

    fn points(
        &mut self,
        handle: ArtistHandle,
        coords: &[Coord<f64>],
        style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Points {
            handle,
            count: coords.len(),
            transform: style.transform.clone(),
        });
        Ok(())
    }

    fn feature(
        &mut self,
        handle: ArtistHandle,
        feature: &MapFeature,
        _style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Feature {
            handle,
            name: feature.name.clone(),
        });
        Ok(())
    }

    fn wmts(
        &mut self,
        handle: ArtistHandle,
        url: &str,
        layer: &str,
        _style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Wmts {
            handle,
            url: url.to_string(),
            layer: layer.to_string(),
        });
        Ok(())
    }

    fn image(
        &mut self,
        handle: ArtistHandle,
        source: &TileSource,
        zoom: u32,
        _style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Image {
            handle,
            name: source.name.clone(),
            zoom,
        });
        Ok(())
    }

    fn text(
        &mut self,
        handle: ArtistHandle,
        anchor: Coord<f64>,
        annotation: &TextAnnotation,
        _style: &Style,
    ) -> anyhow::Result<()> {
        self.log.push(DrawCall::Text {
            handle,
            anchor,
            text: annotation.text.clone(),
            rotation: annotation.rotation,
        });
        Ok(())
    }

    fn remove(&mut self, handle: ArtistHandle) {
        self.log.push(DrawCall::Remove { handle });
    }

    fn clear(&mut self) {
        self.log.push(DrawCall::Clear);
    }
}
