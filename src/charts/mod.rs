//! Charts module - Figure model and chart rendering

mod figure;
mod palette;
mod plotter;
mod renderer;

pub use figure::{
    CountPanel, Figure, FigureSink, HeatmapPanel, HistogramPanel, NullSink, Panel, RenderError,
};
pub use palette::{text_color_for, Colormap, Rgb};
pub use plotter::ChartPlotter;
pub use renderer::{PngSink, StaticChartRenderer};
