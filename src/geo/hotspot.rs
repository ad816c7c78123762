//! Hotspot Map Module
//! Builds a Leaflet heat-layer map of accident locations and writes it as a
//! standalone HTML page.

use super::projection::{GridProjection, LatLon};
use crate::data::AccidentRecord;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Initial zoom of the written map.
pub const DEFAULT_ZOOM: u8 = 10;

/// Center used when no usable point exists.
pub const FALLBACK_CENTER: LatLon = LatLon { lat: 0.0, lon: 0.0 };

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to serialize map data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write map: {0}")]
    Io(#[from] std::io::Error),
}

/// Leaflet.heat options, serialized in the plugin's camelCase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayerOptions {
    pub min_opacity: f64,
    pub max_zoom: u8,
    pub radius: u32,
    pub blur: u32,
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        Self {
            min_opacity: 0.5,
            max_zoom: 18,
            radius: 25,
            blur: 15,
        }
    }
}

/// Density map of accident locations.
#[derive(Debug, Clone)]
pub struct HotspotMap {
    pub center: LatLon,
    pub zoom: u8,
    pub points: Vec<LatLon>,
    /// Records whose converted coordinates were not finite.
    pub skipped: usize,
    pub options: HeatLayerOptions,
}

impl HotspotMap {
    /// Convert every record and center the map on the mean position.
    pub fn build(records: &[AccidentRecord], projection: &dyn GridProjection, zoom: u8) -> Self {
        let (points, rejected): (Vec<LatLon>, Vec<LatLon>) = records
            .iter()
            .map(|r| projection.to_lat_lon(r.easting, r.northing))
            .partition(LatLon::is_finite);

        if !rejected.is_empty() {
            warn!(count = rejected.len(), "skipping non-finite map coordinates");
        }

        let center = mean_center(&points).unwrap_or_else(|| {
            warn!("no mappable accidents, centering map on fallback point");
            FALLBACK_CENTER
        });

        Self {
            center,
            zoom,
            points,
            skipped: rejected.len(),
            options: HeatLayerOptions::default(),
        }
    }

    /// Render the standalone HTML page.
    pub fn to_html(&self) -> Result<String, GeoError> {
        let center = serde_json::to_string(&[self.center.lat, self.center.lon])?;
        let points: Vec<[f64; 2]> = self.points.iter().map(|p| [p.lat, p.lon]).collect();
        let points = serde_json::to_string(&points)?;
        let options = serde_json::to_string(&self.options)?;

        Ok(PAGE_TEMPLATE
            .replace("{{CENTER}}", &center)
            .replace("{{ZOOM}}", &self.zoom.to_string())
            .replace("{{POINTS}}", &points)
            .replace("{{OPTIONS}}", &options))
    }

    /// Write the page to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), GeoError> {
        fs::write(path, self.to_html()?)?;
        info!(
            path = %path.display(),
            points = self.points.len(),
            "hotspot map written"
        );
        Ok(())
    }
}

fn mean_center(points: &[LatLon]) -> Option<LatLon> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(LatLon {
        lat: lat / n,
        lon: lon / n,
    })
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Accident Hotspots</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css" />
    <script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
    <style>
        html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
        #map { position: absolute; top: 0; bottom: 0; left: 0; right: 0; }
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        var map = L.map("map", { center: {{CENTER}}, zoom: {{ZOOM}} });
        L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
            maxZoom: 19,
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
        }).addTo(map);
        L.heatLayer({{POINTS}}, {{OPTIONS}}).addTo(map);
    </script>
</body>
</html>
"#;
