//! Analysis settings. `Default` gives the stock run: `accidents.csv` in, the
//! hotspot map out, charts in windows.

use crate::geo::{DEFAULT_GRID_SCALE, DEFAULT_ZOOM};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "accidents.csv";
pub const DEFAULT_MAP_OUTPUT: &str = "accident_hotspots.html";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_HOUR_BINS: usize = 24;
pub const DEFAULT_CHART_DIR: &str = "charts";

/// Where figures are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DisplayMode {
    /// One blocking window per figure
    #[default]
    Window,
    /// PNG files in the chart directory
    Png,
    /// Build figures without showing them
    Off,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub date_format: String,
    pub grid_scale: f64,
    pub map_zoom: u8,
    pub map_output: PathBuf,
    pub hour_bins: usize,
    pub display: DisplayMode,
    pub chart_dir: PathBuf,
    pub open_map: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            grid_scale: DEFAULT_GRID_SCALE,
            map_zoom: DEFAULT_ZOOM,
            map_output: PathBuf::from(DEFAULT_MAP_OUTPUT),
            hour_bins: DEFAULT_HOUR_BINS,
            display: DisplayMode::default(),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
            open_map: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_run() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("accidents.csv"));
        assert_eq!(config.map_output, PathBuf::from("accident_hotspots.html"));
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.grid_scale, 0.00001);
        assert_eq!(config.map_zoom, 10);
        assert_eq!(config.hour_bins, 24);
        assert_eq!(config.display, DisplayMode::Window);
    }
}
