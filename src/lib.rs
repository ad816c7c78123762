//! Accident EDA - Traffic accident exploratory analysis
//!
//! Loads an accident CSV, derives temporal fields, summarises and
//! cross-tabulates the records, charts them and writes a hotspot heatmap.

pub mod charts;
pub mod config;
pub mod data;
pub mod geo;
pub mod gui;
pub mod pipeline;
pub mod stats;

pub use config::{AnalysisConfig, DisplayMode};
pub use pipeline::{figure_sink, run, AnalysisReport, PipelineError};
