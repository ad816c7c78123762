//! Analysis pipeline: load, clean, describe, chart, map. Each stage takes the
//! previous stage's output by reference and returns a new value.

use crate::charts::{Colormap, Figure, FigureSink, NullSink, PngSink, RenderError};
use crate::config::{AnalysisConfig, DisplayMode};
use crate::data::{CleanedTable, CleanerError, DataCleaner, DataLoader, Dimension, LoaderError};
use crate::geo::{GeoError, HotspotMap, LinearGridScale};
use crate::gui::WindowSink;
use crate::stats::{CategoryCounts, CrossTab, HourHistogram, StatsCalculator, SummaryTable};
use polars::prelude::PolarsError;
use std::io::{self, Write};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanerError),
    #[error("Summary statistics failed: {0}")]
    Stats(#[from] PolarsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Everything the analysis computed.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub retained_rows: usize,
    pub dropped_rows: usize,
    pub summary: SummaryTable,
    pub road_weather: CrossTab,
    pub road_severity: CrossTab,
    pub weather_severity: CrossTab,
    pub map: HotspotMap,
}

/// Figure sink matching the configured display mode.
pub fn figure_sink(config: &AnalysisConfig) -> Box<dyn FigureSink> {
    match config.display {
        DisplayMode::Window => Box::new(WindowSink),
        DisplayMode::Png => Box::new(PngSink::new(&config.chart_dir)),
        DisplayMode::Off => Box::new(NullSink::default()),
    }
}

/// Run the whole analysis. Tables are printed to `out`; figures go to `sink`
/// in the order they are produced.
pub fn run(
    config: &AnalysisConfig,
    sink: &mut dyn FigureSink,
    out: &mut dyn Write,
) -> Result<AnalysisReport, PipelineError> {
    let loaded = DataLoader::load_csv(&config.input_path)?;
    info!(
        source = %loaded.source.display(),
        rows = loaded.row_count(),
        columns = loaded.columns().len(),
        "loaded"
    );

    let cleaned = DataCleaner::new(config.date_format.as_str()).clean(&loaded)?;

    let summary = StatsCalculator::describe(&cleaned.df)?;
    writeln!(out, "{summary}")?;

    sink.present(&distributions_figure(&cleaned, config.hour_bins))?;

    let road_weather = CrossTab::compute(&cleaned.records, Dimension::RoadSurface, Dimension::Weather);
    writeln!(out, "{road_weather}")?;
    sink.present(&Figure::crosstab_heatmap(
        "road_surface_vs_weather",
        "Road Surface vs. Weather Conditions",
        road_weather.clone(),
        Colormap::YlGnBu,
    ))?;

    let projection = LinearGridScale {
        factor: config.grid_scale,
    };
    let map = HotspotMap::build(&cleaned.records, &projection, config.map_zoom);
    map.save(&config.map_output)?;

    let road_severity =
        CrossTab::compute(&cleaned.records, Dimension::RoadSurface, Dimension::Severity);
    let weather_severity =
        CrossTab::compute(&cleaned.records, Dimension::Weather, Dimension::Severity);
    sink.present(&Figure::crosstab_heatmap(
        "road_surface_vs_severity",
        "Road Surface vs. Casualty Severity",
        road_severity.clone(),
        Colormap::OrRd,
    ))?;
    sink.present(&Figure::crosstab_heatmap(
        "weather_vs_severity",
        "Weather Conditions vs. Casualty Severity",
        weather_severity.clone(),
        Colormap::OrRd,
    ))?;

    info!(retained = cleaned.len(), "analysis complete");

    Ok(AnalysisReport {
        retained_rows: cleaned.len(),
        dropped_rows: cleaned.dropped_rows,
        summary,
        road_weather,
        road_severity,
        weather_severity,
        map,
    })
}

fn distributions_figure(cleaned: &CleanedTable, hour_bins: usize) -> Figure {
    Figure::distributions(
        CategoryCounts::compute(&cleaned.records, Dimension::RoadSurface),
        CategoryCounts::compute(&cleaned.records, Dimension::Weather),
        HourHistogram::compute(&cleaned.records, hour_bins),
    )
}
