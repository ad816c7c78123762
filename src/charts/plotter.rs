//! Chart Plotter Module
//! Interactive versions of the figure panels using egui_plot.

use super::figure::{CountPanel, HeatmapPanel, HistogramPanel, Panel};
use super::palette::{text_color_for, Rgb, BAR_COLOR, DENSITY_COLOR};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

const PANEL_HEIGHT: f32 = 380.0;

fn color(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// One grid mark per category so every label gets a tick.
fn category_marks(n: usize) -> Vec<GridMark> {
    (0..n)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Draws figure panels inside an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw_panel(ui: &mut egui::Ui, id: &str, panel: &Panel) {
        ui.label(RichText::new(panel.title()).size(16.0).strong());
        match panel {
            Panel::Counts(p) => Self::draw_count_chart(ui, id, p),
            Panel::Histogram(p) => Self::draw_histogram_chart(ui, id, p),
            Panel::Heatmap(p) => Self::draw_heatmap_chart(ui, id, p),
        }
    }

    /// Bar per category, in first-appearance order.
    pub fn draw_count_chart(ui: &mut egui::Ui, id: &str, panel: &CountPanel) {
        let labels: Vec<String> = panel.counts.entries.iter().map(|(l, _)| l.clone()).collect();
        let n = labels.len();

        let bars: Vec<Bar> = panel
            .counts
            .entries
            .iter()
            .enumerate()
            .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).width(0.8).name(label))
            .collect();

        Plot::new(format!("counts_{id}"))
            .height(PANEL_HEIGHT)
            .x_axis_label(panel.x_label.clone())
            .y_axis_label(panel.y_label.clone())
            .include_y(0.0)
            .allow_scroll(false)
            .x_grid_spacer(move |_input| category_marks(n))
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color(BAR_COLOR)).name("Count"));
            });
    }

    /// Histogram bars spanning each bin, with the density curve on top.
    pub fn draw_histogram_chart(ui: &mut egui::Ui, id: &str, panel: &HistogramPanel) {
        let hist = &panel.histogram;
        let width = hist.bin_width();

        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let center = hist.edges[i] + width / 2.0;
                Bar::new(center, c as f64).width(width)
            })
            .collect();

        Plot::new(format!("histogram_{id}"))
            .height(PANEL_HEIGHT)
            .x_axis_label(panel.x_label.clone())
            .y_axis_label(panel.y_label.clone())
            .include_y(0.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color(BAR_COLOR).gamma_multiply(0.6))
                        .name("Count"),
                );
                if let Some(density) = &hist.density {
                    let points: PlotPoints = density.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(color(DENSITY_COLOR))
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// One colored cell per table entry, annotated with its count. The first
    /// row is drawn at the top.
    pub fn draw_heatmap_chart(ui: &mut egui::Ui, id: &str, panel: &HeatmapPanel) {
        let table = &panel.table;
        let n_rows = table.row_labels.len();
        let n_cols = table.col_labels.len();
        let col_labels = table.col_labels.clone();
        let y_labels: Vec<String> = table.row_labels.iter().rev().cloned().collect();
        let (min, max) = (table.min_count() as f64, table.max_count() as f64);

        Plot::new(format!("heatmap_{id}"))
            .height(PANEL_HEIGHT)
            .x_axis_label(panel.x_label.clone())
            .y_axis_label(panel.y_label.clone())
            .show_grid(false)
            .allow_scroll(false)
            .x_grid_spacer(move |_input| category_marks(n_cols))
            .y_grid_spacer(move |_input| category_marks(n_rows))
            .x_axis_formatter(move |mark, _range| category_label(&col_labels, mark.value))
            .y_axis_formatter(move |mark, _range| category_label(&y_labels, mark.value))
            .show(ui, |plot_ui| {
                for (r, row) in table.counts.iter().enumerate() {
                    let y = (n_rows - 1 - r) as f64;
                    for (c, &count) in row.iter().enumerate() {
                        let x = c as f64;
                        let fill = panel.colormap.color_for(count as f64, min, max);

                        let cell = PlotPoints::new(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]);
                        plot_ui.polygon(
                            Polygon::new(cell)
                                .fill_color(color(fill))
                                .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
                        );
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(count.to_string())
                                .size(14.0)
                                .color(color(text_color_for(fill))),
                        ));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_marks_one_per_category() {
        let marks = category_marks(3);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_axis_label_lookup() {
        let labels = vec!["Fine".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Fine");
        assert_eq!(category_label(&labels, 0.3), "");
    }
}
