//! GUI module - Interactive chart windows

mod app;
mod chart_viewer;

pub use app::{FigureApp, WindowSink};
pub use chart_viewer::ChartViewer;
