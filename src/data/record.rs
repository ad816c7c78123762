//! Accident Record Module
//! Column names of the input table and the typed row produced by cleaning.

use chrono::NaiveDate;

/// Column names as they appear in the accident CSV header.
pub mod columns {
    pub const ACCIDENT_DATE: &str = "Accident Date";
    pub const TIME_24HR: &str = "Time (24hr)";
    pub const EASTING: &str = "Grid Ref: Easting";
    pub const NORTHING: &str = "Grid Ref: Northing";
    pub const ROAD_SURFACE: &str = "Road Surface";
    pub const WEATHER: &str = "Weather Conditions";
    pub const SEVERITY: &str = "Casualty Severity";

    /// Derived columns appended by the cleaner.
    pub const YEAR: &str = "Year";
    pub const HOUR: &str = "Hour";

    /// Columns the loader refuses to run without.
    pub const REQUIRED: [&str; 7] = [
        ACCIDENT_DATE,
        TIME_24HR,
        EASTING,
        NORTHING,
        ROAD_SURFACE,
        WEATHER,
        SEVERITY,
    ];
}

/// Categorical dimensions a cross-tabulation or count plot can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    RoadSurface,
    Weather,
    Severity,
}

impl Dimension {
    /// Human readable label, identical to the source column name.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::RoadSurface => columns::ROAD_SURFACE,
            Dimension::Weather => columns::WEATHER,
            Dimension::Severity => columns::SEVERITY,
        }
    }
}

/// One accident after cleaning. Easting and Northing are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentRecord {
    pub accident_date: Option<NaiveDate>,
    pub time_hhmm: Option<i64>,
    pub easting: f64,
    pub northing: f64,
    pub road_surface: Option<String>,
    pub weather: Option<String>,
    pub severity: Option<String>,
    pub year: Option<i32>,
    /// `time_hhmm` floor-divided by 100. Not range checked.
    pub hour: Option<i64>,
}

impl AccidentRecord {
    /// Category value of this record along `dim`.
    pub fn category(&self, dim: Dimension) -> Option<&str> {
        match dim {
            Dimension::RoadSurface => self.road_surface.as_deref(),
            Dimension::Weather => self.weather.as_deref(),
            Dimension::Severity => self.severity.as_deref(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn test_category_selects_matching_field() {
        let r = record(Some("Wet"), Some("Rain"), None, Some(14));
        assert_eq!(r.category(Dimension::RoadSurface), Some("Wet"));
        assert_eq!(r.category(Dimension::Weather), Some("Rain"));
        assert_eq!(r.category(Dimension::Severity), None);
    }

    #[test]
    fn test_dimension_label_matches_column() {
        assert_eq!(Dimension::Severity.label(), columns::SEVERITY);
    }
}
