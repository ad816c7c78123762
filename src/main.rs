//! Accident EDA - command line entry point.

use accident_eda::{figure_sink, run, AnalysisConfig, DisplayMode};
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "accident_eda")]
#[command(about = "Exploratory analysis and hotspot map of a traffic accident CSV", long_about = None)]
struct Cli {
    /// Accident CSV to analyse
    #[arg(short, long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Where to write the hotspot map
    #[arg(short = 'm', long, value_name = "HTML")]
    map_output: Option<PathBuf>,

    /// How charts are shown
    #[arg(short, long, value_enum)]
    display: Option<DisplayMode>,

    /// Directory for PNG charts when displaying to png
    #[arg(long)]
    chart_dir: Option<PathBuf>,

    /// Initial zoom of the hotspot map
    #[arg(long)]
    zoom: Option<u8>,

    /// Number of bins in the hour-of-day histogram
    #[arg(long)]
    hour_bins: Option<usize>,

    /// Open the hotspot map in the default browser when done
    #[arg(long)]
    open_map: bool,
}

impl Cli {
    fn into_config(self) -> AnalysisConfig {
        let defaults = AnalysisConfig::default();
        AnalysisConfig {
            input_path: self.input.unwrap_or(defaults.input_path),
            map_output: self.map_output.unwrap_or(defaults.map_output),
            display: self.display.unwrap_or(defaults.display),
            chart_dir: self.chart_dir.unwrap_or(defaults.chart_dir),
            map_zoom: self.zoom.unwrap_or(defaults.map_zoom),
            hour_bins: self.hour_bins.unwrap_or(defaults.hour_bins),
            open_map: self.open_map,
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let config = Cli::parse().into_config();
    let mut sink = figure_sink(&config);

    let stdout = io::stdout();
    let report = run(&config, sink.as_mut(), &mut stdout.lock())
        .with_context(|| format!("analysis of {} failed", config.input_path.display()))?;

    info!(
        retained = report.retained_rows,
        dropped = report.dropped_rows,
        map = %config.map_output.display(),
        "done"
    );

    if config.open_map {
        open::that(&config.map_output)
            .with_context(|| format!("could not open {}", config.map_output.display()))?;
    }

    Ok(())
}
