//! Stats module - Summary statistics, cross-tabulations and distributions

mod calculator;
mod crosstab;
mod distribution;

pub use calculator::{percentile, ColumnKind, ColumnSummary, StatsCalculator, SummaryTable};
pub use crosstab::CrossTab;
pub use distribution::{CategoryCounts, HourHistogram, DENSITY_GRID_POINTS};
