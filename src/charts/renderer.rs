//! Static Chart Renderer
//! Draws figures to PNG files with plotters, one stacked panel per chart.
//!
//! Categorical axes use `f64` coordinates with category `i` centred on `i`,
//! so tick marks at whole numbers carry the category labels.

use super::figure::{
    CountPanel, Figure, FigureSink, HeatmapPanel, HistogramPanel, Panel, RenderError,
};
use super::palette::{text_color_for, Rgb, BAR_COLOR, DENSITY_COLOR};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const FONT: &str = "sans-serif";

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Label for a whole-number tick on a categorical axis.
fn category_label(labels: &[String], tick: f64) -> String {
    let idx = tick.round();
    if (tick - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `figure` to a PNG at `path`.
    pub fn render_to_file(figure: &Figure, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, figure.size).into_drawing_area();
        root.fill(&WHITE)?;

        let areas = root.split_evenly((figure.panels.len().max(1), 1));
        for (panel, area) in figure.panels.iter().zip(areas.iter()) {
            match panel {
                Panel::Counts(p) => Self::draw_counts(area, p)?,
                Panel::Histogram(p) => Self::draw_histogram(area, p)?,
                Panel::Heatmap(p) => Self::draw_heatmap(area, p)?,
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_counts<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &CountPanel,
    ) -> Result<(), RenderError> {
        let labels: Vec<String> = panel.counts.entries.iter().map(|(l, _)| l.clone()).collect();
        let n = labels.len().max(1);
        let y_max = panel.counts.max_count().max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .draw()?;

        let fill = rgb(BAR_COLOR).filled();
        chart.draw_series(panel.counts.entries.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], fill)
        }))?;

        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &HistogramPanel,
    ) -> Result<(), RenderError> {
        let hist = &panel.histogram;
        let lo = hist.edges.first().copied().unwrap_or(0.0);
        let hi = hist.edges.last().copied().unwrap_or(24.0);
        let density_max = hist
            .density
            .iter()
            .flatten()
            .map(|(_, y)| *y)
            .fold(0.0f64, f64::max);
        let y_max = (hist.max_count() as f64).max(density_max).max(1.0) * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(lo..hi, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .draw()?;

        let bars = hist
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| [(hist.edges[i], 0.0), (hist.edges[i + 1], c as f64)]);
        chart.draw_series(bars.clone().map(|r| Rectangle::new(r, rgb(BAR_COLOR).mix(0.5).filled())))?;
        chart.draw_series(bars.map(|r| Rectangle::new(r, rgb(BAR_COLOR).stroke_width(1))))?;

        if let Some(density) = &hist.density {
            chart.draw_series(LineSeries::new(
                density.iter().copied(),
                rgb(DENSITY_COLOR).stroke_width(2),
            ))?;
        }

        Ok(())
    }

    fn draw_heatmap<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &HeatmapPanel,
    ) -> Result<(), RenderError> {
        let table = &panel.table;
        let n_rows = table.row_labels.len();
        let n_cols = table.col_labels.len();
        // First row drawn at the top.
        let y_labels: Vec<String> = table.row_labels.iter().rev().cloned().collect();

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, 22))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(140)
            .build_cartesian_2d(
                -0.5f64..(n_cols.max(1) as f64 - 0.5),
                -0.5f64..(n_rows.max(1) as f64 - 0.5),
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n_cols.max(1))
            .y_labels(n_rows.max(1))
            .x_label_formatter(&|v| category_label(&table.col_labels, *v))
            .y_label_formatter(&|v| category_label(&y_labels, *v))
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .draw()?;

        let (min, max) = (table.min_count() as f64, table.max_count() as f64);
        for (r, row) in table.counts.iter().enumerate() {
            let y = (n_rows - 1 - r) as f64;
            for (c, &count) in row.iter().enumerate() {
                let x = c as f64;
                let fill = panel.colormap.color_for(count as f64, min, max);
                let text_style = (FONT, 16)
                    .into_font()
                    .color(&rgb(text_color_for(fill)))
                    .pos(Pos::new(HPos::Center, VPos::Center));

                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    rgb(fill).filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    count.to_string(),
                    (x, y),
                    text_style,
                )))?;
            }
        }

        Ok(())
    }
}

/// Writes every presented figure to `<dir>/<slug>.png`.
pub struct PngSink {
    dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }
}

impl FigureSink for PngSink {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.png", figure.slug));
        StaticChartRenderer::render_to_file(figure, &path)?;
        info!(path = %path.display(), "chart written");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_whole_ticks() {
        let labels = vec!["Dry".to_string(), "Wet".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Dry");
        assert_eq!(category_label(&labels, 1.0), "Wet");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
