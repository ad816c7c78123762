//! Grid reference to latitude/longitude conversion.

use serde::Serialize;

/// Scale factor of the default approximation.
pub const DEFAULT_GRID_SCALE: f64 = 0.00001;

/// A point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Converts national grid Easting/Northing into latitude/longitude.
pub trait GridProjection {
    fn to_lat_lon(&self, easting: f64, northing: f64) -> LatLon;
}

/// Linear scaling of Northing to latitude and Easting to longitude.
///
/// This is a rough approximation, not a geodetic transform: results are only
/// useful for relative placement and must not be read as real coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGridScale {
    pub factor: f64,
}

impl Default for LinearGridScale {
    fn default() -> Self {
        Self {
            factor: DEFAULT_GRID_SCALE,
        }
    }
}

impl GridProjection for LinearGridScale {
    fn to_lat_lon(&self, easting: f64, northing: f64) -> LatLon {
        LatLon {
            lat: northing * self.factor,
            lon: easting * self.factor,
        }
    }
}
