//! Figure Module
//! Backend-neutral description of the charts the analysis shows. The window
//! viewer and the PNG renderer both draw from these values.

use super::palette::Colormap;
use crate::stats::{CategoryCounts, CrossTab, HourHistogram};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("Chart window failed: {0}")]
    Window(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bar chart of category frequencies.
#[derive(Debug, Clone)]
pub struct CountPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub counts: CategoryCounts,
}

/// Histogram with an optional density curve.
#[derive(Debug, Clone)]
pub struct HistogramPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: HourHistogram,
}

/// Annotated heatmap of a cross-tabulation. Rows run down the y axis.
#[derive(Debug, Clone)]
pub struct HeatmapPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub table: CrossTab,
    pub colormap: Colormap,
}

#[derive(Debug, Clone)]
pub enum Panel {
    Counts(CountPanel),
    Histogram(HistogramPanel),
    Heatmap(HeatmapPanel),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Counts(p) => &p.title,
            Panel::Histogram(p) => &p.title,
            Panel::Heatmap(p) => &p.title,
        }
    }
}

/// A window's worth of panels, stacked vertically.
#[derive(Debug, Clone)]
pub struct Figure {
    /// File-name friendly identifier.
    pub slug: String,
    pub title: String,
    pub size: (u32, u32),
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Road surface and weather counts above the hour-of-day histogram.
    pub fn distributions(
        road_surface: CategoryCounts,
        weather: CategoryCounts,
        hours: HourHistogram,
    ) -> Self {
        Self {
            slug: "distributions".to_string(),
            title: "Accident Distributions".to_string(),
            size: (1200, 1500),
            panels: vec![
                Panel::Counts(CountPanel {
                    title: "Distribution of Road Surfaces".to_string(),
                    x_label: "Road Surface".to_string(),
                    y_label: "Count".to_string(),
                    counts: road_surface,
                }),
                Panel::Counts(CountPanel {
                    title: "Distribution of Weather Conditions".to_string(),
                    x_label: "Weather Conditions".to_string(),
                    y_label: "Count".to_string(),
                    counts: weather,
                }),
                Panel::Histogram(HistogramPanel {
                    title: "Distribution of Accidents by Hour of Day".to_string(),
                    x_label: "Hour of Day".to_string(),
                    y_label: "Count".to_string(),
                    histogram: hours,
                }),
            ],
        }
    }

    /// Single annotated heatmap; axis labels come from the table dimensions.
    pub fn crosstab_heatmap(slug: &str, title: &str, table: CrossTab, colormap: Colormap) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            size: (1000, 600),
            panels: vec![Panel::Heatmap(HeatmapPanel {
                title: title.to_string(),
                x_label: table.col_dim.label().to_string(),
                y_label: table.row_dim.label().to_string(),
                table,
                colormap,
            })],
        }
    }
}

/// Where finished figures go.
pub trait FigureSink {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError>;
}

/// Discards figures, remembering their slugs.
#[derive(Debug, Default)]
pub struct NullSink {
    pub presented: Vec<String>,
}

impl FigureSink for NullSink {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        debug!(figure = %figure.slug, "display disabled, skipping figure");
        self.presented.push(figure.slug.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;
    use crate::data::Dimension;

    #[test]
    fn test_distributions_figure_layout() {
        let records = vec![record(Some("Wet"), Some("Rain"), Some("Slight"), Some(14))];
        let fig = Figure::distributions(
            CategoryCounts::compute(&records, Dimension::RoadSurface),
            CategoryCounts::compute(&records, Dimension::Weather),
            HourHistogram::compute(&records, 24),
        );

        let titles: Vec<&str> = fig.panels.iter().map(Panel::title).collect();
        assert_eq!(
            titles,
            vec![
                "Distribution of Road Surfaces",
                "Distribution of Weather Conditions",
                "Distribution of Accidents by Hour of Day",
            ]
        );
    }

    #[test]
    fn test_heatmap_axis_labels_follow_dimensions() {
        let table = CrossTab::compute(&[], Dimension::RoadSurface, Dimension::Severity);
        let fig = Figure::crosstab_heatmap(
            "road_surface_vs_severity",
            "Road Surface vs. Casualty Severity",
            table,
            Colormap::OrRd,
        );

        let Panel::Heatmap(panel) = &fig.panels[0] else {
            panic!("expected heatmap panel");
        };
        assert_eq!(panel.x_label, "Casualty Severity");
        assert_eq!(panel.y_label, "Road Surface");
    }

    #[test]
    fn test_null_sink_records_slugs() {
        let table = CrossTab::compute(&[], Dimension::RoadSurface, Dimension::Weather);
        let fig = Figure::crosstab_heatmap("x", "X", table, Colormap::YlGnBu);

        let mut sink = NullSink::default();
        sink.present(&fig).unwrap();
        assert_eq!(sink.presented, vec!["x"]);
    }
}
