//! Geo module - Grid reference conversion and the hotspot heatmap

mod hotspot;
mod projection;

pub use hotspot::{GeoError, HeatLayerOptions, HotspotMap, DEFAULT_ZOOM, FALLBACK_CENTER};
pub use projection::{GridProjection, LatLon, LinearGridScale, DEFAULT_GRID_SCALE};
