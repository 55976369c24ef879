//! Chart description and rendering backends.
//!
//! The analyser never draws directly. It fills a [`ChartSpec`] for every
//! (parameter, network) pair and hands it to a [`Renderer`] together with the
//! target path.
//!
//! - [`palette`]: trace and band colours
//! - [`png`]: PNG backend built on `plotters` (feature `png`)

pub mod palette;
#[cfg(feature = "png")]
pub mod png;

use std::ops::Range;
use std::path::Path;

use crate::error::AnalysisResult;
pub use palette::PaletteColor;
#[cfg(feature = "png")]
pub use png::PlottersRenderer;

/// A line plotted from `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: Option<String>,
    pub color: PaletteColor,
    pub points: Vec<(f64, f64)>,
}

/// A translucent vertical band on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedRegion {
    pub start: f64,
    pub stop: f64,
    pub color: PaletteColor,
    pub alpha: f64,
    /// Present when the region should appear in the legend.
    pub label: Option<String>,
}

/// Horizontal dashed line across the plot at `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub y: f64,
    pub color: PaletteColor,
}

/// Text drawn just right of the plot area, vertically aligned with `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginNote {
    pub y: f64,
    pub text: String,
    pub color: PaletteColor,
}

/// Everything needed to draw one chart image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub curves: Vec<Curve>,
    pub regions: Vec<ShadedRegion>,
    pub reference_lines: Vec<ReferenceLine>,
    pub notes: Vec<MarginNote>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            grid: true,
            ..Default::default()
        }
    }

    pub fn has_legend_entries(&self) -> bool {
        self.curves.iter().any(|c| c.label.is_some())
            || self.regions.iter().any(|r| r.label.is_some())
    }

    /// Data bounds covering curves, regions and reference lines, padded by 5%.
    ///
    /// Falls back to `0..1` on an axis with nothing to show.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let xs = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p.0))
            .chain(self.regions.iter().flat_map(|r| [r.start, r.stop]));
        let ys = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p.1))
            .chain(self.reference_lines.iter().map(|l| l.y))
            .chain(self.notes.iter().map(|n| n.y));
        (padded_range(xs), padded_range(ys))
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }
    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Rendering backend: turns a chart description into an image file.
pub trait Renderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> AnalysisResult<()>;
}
