//! Tick specification and geodetic degree formatting.

use std::fmt;
use std::sync::Arc;

/// Which axis a tick operation applies to. The horizontal axis is treated
/// as longitude, the vertical as latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSide {
    X,
    Y,
}

/// A tick-position generator installed directly on the axis.
pub trait TickLocator: fmt::Debug {
    /// Positions for the current axis limits.
    fn locate(&self, lo: f64, hi: f64) -> Vec<f64>;
}

/// How the caller asks for ticks on one axis.
#[derive(Debug, Clone)]
pub enum Ticks {
    /// N evenly spaced positions over the current axis limits, labelled by
    /// the geodetic degree formatter.
    Count(usize),
    /// An explicit locator, installed as-is.
    Locator(Arc<dyn TickLocator>),
    /// Clears the axis ticks.
    Hidden,
    /// A flat list of positions, labelled by the default degree formatter.
    Positions(Vec<f64>),
    /// Explicit (position, label) pairs; no formatter is involved.
    Labelled(Vec<(f64, String)>),
}

/// Formats axis values as hemisphere-suffixed degrees, truncated to three
/// significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeFormatter {
    pub side: AxisSide,
}

impl DegreeFormatter {
    pub fn format(&self, value: f64) -> String {
        if value == 0.0 {
            return "0°".to_string();
        }
        let suffix = match (self.side, value > 0.0) {
            (AxisSide::X, true) => "E",
            (AxisSide::X, false) => "W",
            (AxisSide::Y, true) => "N",
            (AxisSide::Y, false) => "S",
        };
        format!("{}°{}", truncate_significant(value.abs(), 3), suffix)
    }
}

/// The tick configuration currently installed on one axis side.
#[derive(Debug, Clone, Default)]
pub enum TickState {
    /// Backend-chosen ticks, untouched by the geo layer.
    #[default]
    Auto,
    /// Ticks explicitly cleared.
    Cleared,
    /// Fixed positions, optionally with explicit labels or a formatter.
    Fixed {
        positions: Vec<f64>,
        labels: Option<Vec<String>>,
        formatter: Option<DegreeFormatter>,
        rotation: f64,
    },
    /// A caller-supplied locator.
    Locator {
        locator: Arc<dyn TickLocator>,
        rotation: f64,
    },
}

/// `n` evenly spaced values covering [lo, hi] inclusive.
pub fn evenly_spaced(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Truncates a positive value to the given number of significant digits.
fn truncate_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits - 1 - value.abs().log10().floor() as i32);
    let scaled = value * scale;
    // Absorb representation noise so a value stored a few ulps below an
    // integer boundary does not lose its last digit.
    (scaled * (1.0 + 4.0 * f64::EPSILON)).trunc() / scale
}
