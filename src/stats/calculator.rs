//! Statistics Calculator Module
//! Summary statistics (count, mean, std, quartiles) over the cleaned table.

use crate::data::date_from_epoch_days;
use polars::prelude::*;
use rayon::prelude::*;
use std::fmt;

/// Row labels of the summary table, in print order.
const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// How a summarised column is interpreted and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    /// Values are days since 1970-01-01.
    Date,
}

/// Descriptive statistics of a single column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn empty(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }

    fn stat(&self, label: &str) -> String {
        let value = match label {
            "count" => return self.count.to_string(),
            "mean" => self.mean,
            "std" if self.kind == ColumnKind::Date => return "NaN".to_string(),
            "std" => self.std,
            "min" => self.min,
            "25%" => self.q25,
            "50%" => self.median,
            "75%" => self.q75,
            _ => self.max,
        };
        match self.kind {
            ColumnKind::Numeric => format_number(value),
            ColumnKind::Date => format_date(value),
        }
    }
}

/// The printed `describe` table: one column per summarised input column.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub columns: Vec<ColumnSummary>,
}

impl SummaryTable {
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_w = STAT_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| STAT_LABELS.iter().map(|l| c.stat(l)).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, vals)| {
                vals.iter()
                    .map(String::len)
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_w$}", "")?;
        for (c, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", c.name)?;
        }
        writeln!(f)?;

        for (row, label) in STAT_LABELS.iter().enumerate() {
            write!(f, "{label:<label_w$}")?;
            for (vals, w) in cells.iter().zip(&widths) {
                write!(f, "  {:>w$}", vals[row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Handles descriptive statistics with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarise every numeric and date column of `df`, preserving column order.
    pub fn describe(df: &DataFrame) -> PolarsResult<SummaryTable> {
        let targets: Vec<(&Column, ColumnKind)> = df
            .get_columns()
            .iter()
            .filter_map(|col| Self::column_kind(col.dtype()).map(|kind| (col, kind)))
            .collect();

        let columns = targets
            .par_iter()
            .map(|(col, kind)| {
                let values = Self::column_values(col, *kind)?;
                Ok(Self::compute_descriptive_stats(col.name(), *kind, &values))
            })
            .collect::<PolarsResult<Vec<_>>>()?;

        Ok(SummaryTable { columns })
    }

    fn column_kind(dtype: &DataType) -> Option<ColumnKind> {
        match dtype {
            DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Some(ColumnKind::Numeric),
            DataType::Date => Some(ColumnKind::Date),
            _ => None,
        }
    }

    fn column_values(col: &Column, kind: ColumnKind) -> PolarsResult<Vec<f64>> {
        let as_f64 = match kind {
            ColumnKind::Numeric => col.cast(&DataType::Float64)?,
            ColumnKind::Date => col.cast(&DataType::Int32)?.cast(&DataType::Float64)?,
        };
        Ok(as_f64
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(name: &str, kind: ColumnKind, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::empty(name, kind);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        ColumnSummary {
            name: name.to_string(),
            kind,
            count: n,
            mean,
            std,
            min: sorted[0],
            q25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q75: percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e7).contains(&magnitude) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

fn format_date(days: f64) -> String {
    if !days.is_finite() {
        return "NaT".to_string();
    }
    date_from_epoch_days(days.floor() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "NaT".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_matches_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 25.0), 1.75);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 75.0), 3.25);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_descriptive_stats_sample_std() {
        let s = StatsCalculator::compute_descriptive_stats(
            "x",
            ColumnKind::Numeric,
            &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
        );
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert!((s.std - 2.138089935299395).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_describe_skips_text_and_nulls() {
        let df = DataFrame::new(vec![
            Column::new("Hour".into(), vec![Some(14i64), None, Some(8)]),
            Column::new("Road Surface".into(), vec!["Wet", "Dry", "Wet"]),
        ])
        .unwrap();

        let table = StatsCalculator::describe(&df).unwrap();
        assert_eq!(table.columns.len(), 1);

        let hour = table.get("Hour").unwrap();
        assert_eq!(hour.count, 2);
        assert_eq!(hour.mean, 11.0);
    }

    #[test]
    fn test_describe_ignores_nan_values() {
        let df = DataFrame::new(vec![Column::new(
            "x".into(),
            vec![Some(1.0f64), Some(f64::NAN), Some(3.0), None],
        )])
        .unwrap();

        let table = StatsCalculator::describe(&df).unwrap();
        let x = table.get("x").unwrap();
        assert_eq!(x.count, 2);
        assert_eq!(x.mean, 2.0);
        assert_eq!(x.min, 1.0);
        assert_eq!(x.max, 3.0);
        assert_eq!(x.median, 2.0);
    }

    #[test]
    fn test_describe_empty_frame_reports_zero_counts() {
        let df = DataFrame::new(vec![Column::new("Year".into(), Vec::<Option<i32>>::new())]).unwrap();

        let table = StatsCalculator::describe(&df).unwrap();
        let year = table.get("Year").unwrap();
        assert_eq!(year.count, 0);
        assert!(year.mean.is_nan());

        let printed = table.to_string();
        assert!(printed.contains("count"));
        assert!(printed.contains("NaN"));
    }

    #[test]
    fn test_date_columns_print_as_dates() {
        let summary = StatsCalculator::compute_descriptive_stats(
            "Accident Date",
            ColumnKind::Date,
            &[18326.0],
        );
        assert_eq!(summary.stat("min"), "2020-03-05");
        assert_eq!(summary.stat("std"), "NaN");
    }
}
