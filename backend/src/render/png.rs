//! PNG chart backend built on `plotters`.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use super::{ChartSpec, PaletteColor, Renderer};
use crate::error::{AnalysisError, AnalysisResult};

const FONT_FAMILY: &str = "sans-serif";
const POINTS_PER_INCH: f64 = 72.0;
/// Number of dashes drawn across the plot for a reference line.
const DASH_COUNT: usize = 40;

/// Draws charts to PNG files at a fixed physical size and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottersRenderer {
    pub dpi: u32,
    /// Figure size in inches (width, height).
    pub figure_size_in: (f64, f64),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            dpi: 600,
            figure_size_in: (6.4, 4.8),
        }
    }
}

impl PlottersRenderer {
    pub fn new(dpi: u32, figure_size_in: (f64, f64)) -> Self {
        Self {
            dpi,
            figure_size_in,
        }
    }

    /// Image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.figure_size_in.0 * dpi).round().max(1.0) as u32,
            (self.figure_size_in.1 * dpi).round().max(1.0) as u32,
        )
    }

    /// Points to pixels at this renderer's resolution.
    fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }

    fn draw(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, self.pixel_size()).into_drawing_area();
        root.fill(&WHITE)?;

        let px = |points: f64| self.px(points);
        let (x_range, y_range) = spec.bounds();
        let (y_lo, y_hi) = (y_range.start, y_range.end);
        let (x_lo, x_hi) = (x_range.start, x_range.end);

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, (FONT_FAMILY, px(12.0)))
            .margin(px(8.0) as u32)
            .x_label_area_size(px(36.0) as u32)
            .y_label_area_size(px(48.0) as u32)
            .right_y_label_area_size(px(40.0) as u32)
            .build_cartesian_2d(x_range, y_range)?;

        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(spec.x_label.as_str())
                .y_desc(spec.y_label.as_str())
                .label_style((FONT_FAMILY, px(9.0)))
                .axis_desc_style((FONT_FAMILY, px(10.0)));
            if !spec.grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;
        }

        let legend_w = px(14.0) as i32;
        let legend_h = px(4.0) as i32;
        let stroke = px(1.2).max(1.0) as u32;

        for region in &spec.regions {
            let style = rgb(region.color).mix(region.alpha).filled();
            let series = chart.draw_series(std::iter::once(Rectangle::new(
                [(region.start, y_lo), (region.stop, y_hi)],
                style,
            )))?;
            if let Some(label) = &region.label {
                series.label(label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - legend_h), (x + legend_w, y + legend_h)], style)
                });
            }
        }

        for curve in &spec.curves {
            let style = rgb(curve.color).stroke_width(stroke);
            let series =
                chart.draw_series(LineSeries::new(curve.points.iter().copied(), style))?;
            if let Some(label) = &curve.label {
                series.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_w, y)], style)
                });
            }
        }

        let dash = (x_hi - x_lo) / (DASH_COUNT as f64 * 2.0);
        for line in &spec.reference_lines {
            let style = rgb(line.color).stroke_width(stroke);
            chart.draw_series((0..DASH_COUNT).map(|i| {
                let start = x_lo + dash * 2.0 * i as f64;
                PathElement::new(vec![(start, line.y), (start + dash, line.y)], style)
            }))?;
        }

        if spec.has_legend_entries() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerMiddle)
                .label_font((FONT_FAMILY, px(9.0)))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        // Margin notes sit right of the plot area, aligned with their y value.
        let line_height = px(10.0) as i32;
        for note in &spec.notes {
            let (plot_right, y) = chart.backend_coord(&(x_hi, note.y));
            let lines: Vec<&str> = note.text.lines().collect();
            let top = y - line_height * lines.len() as i32 / 2;
            let style = (FONT_FAMILY, px(9.0)).into_font().color(&rgb(note.color));
            for (i, text) in lines.iter().enumerate() {
                root.draw(&Text::new(
                    text.to_string(),
                    (plot_right + px(4.0) as i32, top + line_height * i as i32),
                    style.clone(),
                ))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

fn rgb(color: PaletteColor) -> RGBColor {
    let (r, g, b) = color.rgb;
    RGBColor(r, g, b)
}

impl Renderer for PlottersRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> AnalysisResult<()> {
        self.draw(chart, path)
            .map_err(|e| AnalysisError::Render(format!("{}: {:#}", path.display(), e)))
    }
}
