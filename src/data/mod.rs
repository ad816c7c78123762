//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;
mod record;

pub use cleaner::{hour_of, CleanedTable, CleanerError, DataCleaner};
pub(crate) use cleaner::date_from_epoch_days;
pub use loader::{DataLoader, LoadedTable, LoaderError};
pub use record::{columns, AccidentRecord, Dimension};

#[cfg(test)]
pub(crate) use record::fixtures;
