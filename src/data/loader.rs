//! CSV Data Loader Module
//! Reads the accident CSV into a Polars DataFrame and checks its columns.

use super::record::columns;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Rows used by Polars to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// The table as read from disk, before any cleaning.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub df: DataFrame,
    pub source: PathBuf,
}

impl LoadedTable {
    /// Number of data rows read.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// List of column names in file order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Loads accident CSV files with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and verify that every required column is present.
    pub fn load_csv(file_path: &Path) -> Result<LoadedTable, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        info!(path = %file_path.display(), "loading accident table");

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        Self::check_required_columns(&df)?;

        debug!(rows = df.height(), columns = df.width(), "csv loaded");

        Ok(LoadedTable {
            df,
            source: file_path.to_path_buf(),
        })
    }

    /// Fail on the first required column absent from `df`.
    pub fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let present = df.get_column_names();
        for required in columns::REQUIRED {
            if !present.iter().any(|name| name.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const HEADER: &str = "Accident Date,Time (24hr),Grid Ref: Easting,Grid Ref: Northing,Road Surface,Weather Conditions,Casualty Severity";

    fn temp_csv(name: &str, body: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_csv_reads_rows_and_columns() {
        let path = temp_csv(
            "accident_eda_loader_rows.csv",
            &format!("{HEADER}\n05/03/2020,1430,530000,180000,Wet,Rain,Slight\n"),
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns().len(), 7);
        assert_eq!(table.source, path);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_csv_missing_file() {
        let path = env::temp_dir().join("accident_eda_definitely_missing.csv");
        let _ = fs::remove_file(&path);

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_load_csv_missing_column() {
        let path = temp_csv(
            "accident_eda_loader_missing_col.csv",
            "Accident Date,Time (24hr),Grid Ref: Easting\n05/03/2020,1430,530000\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        match err {
            LoaderError::MissingColumn(name) => assert_eq!(name, columns::NORTHING),
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_file(&path).unwrap();
    }
}
