//! Data Cleaner Module
//! Parses accident dates, derives `Year` and `Hour`, and drops rows without a
//! grid reference.

use super::loader::LoadedTable;
use super::record::{columns, AccidentRecord};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the Polars `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Row {row}: '{value}' does not match date format '{format}'")]
    DateParse {
        row: usize,
        value: String,
        format: String,
    },
}

/// Cleaned table: the filtered frame with derived columns, plus typed rows.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub df: DataFrame,
    pub records: Vec<AccidentRecord>,
    pub dropped_rows: usize,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Handles date parsing, derived columns and the grid-reference filter.
pub struct DataCleaner {
    date_format: String,
}

impl DataCleaner {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Produce a cleaned copy of `table`. The loaded table is left untouched.
    pub fn clean(&self, table: &LoadedTable) -> Result<CleanedTable, CleanerError> {
        let mut df = table.df.clone();
        let total = df.height();

        // Dates are parsed for every row before filtering, so a bad date in a
        // row that is later dropped still fails the run.
        let dates = self.parse_dates(&df)?;
        let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(days_since_epoch)).collect();
        let years: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.year())).collect();
        let hours = Self::derive_hours(&df)?;

        let date_col = Column::new(columns::ACCIDENT_DATE.into(), days).cast(&DataType::Date)?;
        let easting = grid_column(&df, columns::EASTING)?;
        let northing = grid_column(&df, columns::NORTHING)?;

        df.with_column(date_col)?;
        df.with_column(easting)?;
        df.with_column(northing)?;
        df.with_column(Column::new(columns::YEAR.into(), years))?;
        df.with_column(Column::new(columns::HOUR.into(), hours))?;

        let cleaned = df
            .lazy()
            .filter(
                col(columns::EASTING)
                    .is_not_null()
                    .and(col(columns::NORTHING).is_not_null()),
            )
            .collect()?;

        let dropped_rows = total - cleaned.height();
        info!(
            retained = cleaned.height(),
            dropped = dropped_rows,
            "dropped rows without a grid reference"
        );

        let records = Self::extract_records(&cleaned)?;
        debug!(records = records.len(), "typed records extracted");

        Ok(CleanedTable {
            df: cleaned,
            records,
            dropped_rows,
        })
    }

    /// Parse the date column. Missing or blank cells stay missing.
    fn parse_dates(&self, df: &DataFrame) -> Result<Vec<Option<NaiveDate>>, CleanerError> {
        let raw = df.column(columns::ACCIDENT_DATE)?.cast(&DataType::String)?;
        let ca = raw.str()?;

        ca.into_iter()
            .enumerate()
            .map(|(row, value)| match value.map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => NaiveDate::parse_from_str(text, &self.date_format)
                    .map(Some)
                    .map_err(|_| CleanerError::DateParse {
                        row,
                        value: text.to_string(),
                        format: self.date_format.clone(),
                    }),
            })
            .collect()
    }

    /// `Hour` is the HHMM time floor-divided by 100, with no range check.
    fn derive_hours(df: &DataFrame) -> Result<Vec<Option<i64>>, CleanerError> {
        let time = df.column(columns::TIME_24HR)?.cast(&DataType::Int64)?;
        Ok(time
            .i64()?
            .into_iter()
            .map(|t| t.map(hour_of))
            .collect())
    }

    fn extract_records(df: &DataFrame) -> Result<Vec<AccidentRecord>, CleanerError> {
        let days = int32_values(df, columns::ACCIDENT_DATE)?;
        let times = int64_values(df, columns::TIME_24HR)?;
        let eastings = float_values(df, columns::EASTING)?;
        let northings = float_values(df, columns::NORTHING)?;
        let roads = string_values(df, columns::ROAD_SURFACE)?;
        let weathers = string_values(df, columns::WEATHER)?;
        let severities = string_values(df, columns::SEVERITY)?;
        let years = int32_values(df, columns::YEAR)?;
        let hours = int64_values(df, columns::HOUR)?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(easting), Some(northing)) = (eastings[i], northings[i]) else {
                continue;
            };
            records.push(AccidentRecord {
                accident_date: days[i].and_then(date_from_epoch_days),
                time_hhmm: times[i],
                easting,
                northing,
                road_surface: roads[i].clone(),
                weather: weathers[i].clone(),
                severity: severities[i].clone(),
                year: years[i],
                hour: hours[i],
            });
        }
        Ok(records)
    }
}

/// Floor division, so negative encodings round toward negative infinity.
pub fn hour_of(time_hhmm: i64) -> i64 {
    time_hhmm.div_euclid(100)
}

pub(crate) fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Grid reference as `Float64` with NaN folded into null, so the missing-value
/// filter drops it.
fn grid_column(df: &DataFrame, name: &str) -> PolarsResult<Column> {
    let values: Vec<Option<f64>> = float_values(df, name)?
        .into_iter()
        .map(|v| v.filter(|v| !v.is_nan()))
        .collect();
    Ok(Column::new(name.into(), values))
}

fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let col = df.column(name)?.cast(&DataType::String)?;
    Ok(col.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    Ok(col.f64()?.into_iter().collect())
}

fn int64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let col = df.column(name)?.cast(&DataType::Int64)?;
    Ok(col.i64()?.into_iter().collect())
}

fn int32_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i32>>> {
    let col = df.column(name)?.cast(&DataType::Int32)?;
    Ok(col.i32()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn table(rows: Vec<(Option<&str>, Option<i64>, Option<f64>, Option<f64>)>) -> LoadedTable {
        let n = rows.len();
        let dates: Vec<Option<&str>> = rows.iter().map(|r| r.0).collect();
        let times: Vec<Option<i64>> = rows.iter().map(|r| r.1).collect();
        let eastings: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
        let northings: Vec<Option<f64>> = rows.iter().map(|r| r.3).collect();

        let df = DataFrame::new(vec![
            Column::new(columns::ACCIDENT_DATE.into(), dates),
            Column::new(columns::TIME_24HR.into(), times),
            Column::new(columns::EASTING.into(), eastings),
            Column::new(columns::NORTHING.into(), northings),
            Column::new(columns::ROAD_SURFACE.into(), vec!["Wet"; n]),
            Column::new(columns::WEATHER.into(), vec!["Rain"; n]),
            Column::new(columns::SEVERITY.into(), vec!["Slight"; n]),
        ])
        .unwrap();

        LoadedTable {
            df,
            source: PathBuf::from("memory.csv"),
        }
    }

    fn cleaner() -> DataCleaner {
        DataCleaner::new("%d/%m/%Y")
    }

    #[test]
    fn test_clean_derives_year_and_hour() {
        let loaded = table(vec![(
            Some("05/03/2020"),
            Some(1430),
            Some(530000.0),
            Some(180000.0),
        )]);

        let cleaned = cleaner().clean(&loaded).unwrap();
        assert_eq!(cleaned.len(), 1);

        let r = &cleaned.records[0];
        assert_eq!(r.accident_date, NaiveDate::from_ymd_opt(2020, 3, 5));
        assert_eq!(r.year, Some(2020));
        assert_eq!(r.hour, Some(14));
        assert_eq!(r.road_surface.as_deref(), Some("Wet"));
    }

    #[test]
    fn test_clean_drops_rows_without_grid_reference() {
        let loaded = table(vec![
            (Some("01/01/2019"), Some(800), Some(1.0), Some(2.0)),
            (Some("02/01/2019"), Some(900), Some(1.0), None),
            (Some("03/01/2019"), Some(1000), None, Some(2.0)),
        ]);

        let cleaned = cleaner().clean(&loaded).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.dropped_rows, 2);
        assert_eq!(cleaned.df.height(), 1);
        assert_eq!(loaded.df.height(), 3);
    }

    #[test]
    fn test_clean_drops_nan_grid_reference() {
        let loaded = table(vec![
            (Some("05/03/2020"), Some(1430), Some(530000.0), Some(180000.0)),
            (Some("06/03/2020"), Some(1500), Some(531000.0), Some(f64::NAN)),
            (Some("07/03/2020"), Some(1600), Some(f64::NAN), Some(181000.0)),
        ]);

        let cleaned = cleaner().clean(&loaded).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.dropped_rows, 2);
        assert_eq!(cleaned.df.height(), 1);
        assert!(cleaned
            .records
            .iter()
            .all(|r| r.easting.is_finite() && r.northing.is_finite()));
    }

    #[test]
    fn test_clean_fails_on_bad_date_even_in_dropped_row() {
        let loaded = table(vec![
            (Some("05/03/2020"), Some(1430), Some(1.0), Some(2.0)),
            (Some("2020-03-05"), Some(1430), Some(1.0), None),
        ]);

        let err = cleaner().clean(&loaded).unwrap_err();
        match err {
            CleanerError::DateParse { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "2020-03-05");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_date_and_time_stay_missing() {
        let loaded = table(vec![(None, None, Some(1.0), Some(2.0))]);

        let cleaned = cleaner().clean(&loaded).unwrap();
        let r = &cleaned.records[0];
        assert_eq!(r.accident_date, None);
        assert_eq!(r.year, None);
        assert_eq!(r.hour, None);
    }

    #[test]
    fn test_out_of_range_time_passes_through() {
        assert_eq!(hour_of(2460), 24);
        assert_eq!(hour_of(5), 0);
        assert_eq!(hour_of(-30), -1);
    }

    #[test]
    fn test_epoch_day_conversion() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_since_epoch(epoch), 0);

        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        assert_eq!(date_from_epoch_days(days_since_epoch(date)), Some(date));
    }
}
