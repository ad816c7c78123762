//! Distribution Module
//! Category frequencies for count plots and the hour-of-day histogram with
//! its kernel density overlay.

use crate::data::{AccidentRecord, Dimension};
use statrs::distribution::{Continuous, Normal};
use std::collections::HashMap;

/// Points at which the density curve is evaluated.
pub const DENSITY_GRID_POINTS: usize = 200;

/// Frequency of each category, in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounts {
    pub dimension: Dimension,
    pub entries: Vec<(String, u64)>,
}

impl CategoryCounts {
    pub fn compute(records: &[AccidentRecord], dimension: Dimension) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();

        for value in records.iter().filter_map(|r| r.category(dimension)) {
            match index.get(value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value, entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }

        Self { dimension, entries }
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn max_count(&self) -> u64 {
        self.entries.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }
}

/// Equal-width histogram of `Hour` with an optional count-scaled density.
#[derive(Debug, Clone, PartialEq)]
pub struct HourHistogram {
    /// `bins + 1` edges; the last bin is closed on the right.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    /// `(x, expected count)` pairs, absent for degenerate samples.
    pub density: Option<Vec<(f64, f64)>>,
}

impl HourHistogram {
    pub fn compute(records: &[AccidentRecord], bins: usize) -> Self {
        let hours: Vec<f64> = records.iter().filter_map(|r| r.hour).map(|h| h as f64).collect();
        Self::from_values(&hours, bins)
    }

    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = value_range(values);
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let density = gaussian_kde(values).map(|kde| {
            let scale = values.len() as f64 * width;
            let (min, max) = min_max(values);
            let step = (max - min) / (DENSITY_GRID_POINTS - 1) as f64;
            (0..DENSITY_GRID_POINTS)
                .map(|i| {
                    let x = min + step * i as f64;
                    (x, kde(x) * scale)
                })
                .collect()
        });

        Self {
            edges,
            counts,
            density,
        }
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Histogram range: the observed range, widened by half a unit on each side
/// when all values coincide, and `0..24` when there are none.
fn value_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 24.0);
    }
    let (lo, hi) = min_max(values);
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Gaussian kernel density estimate with Scott's bandwidth.
fn gaussian_kde(values: &[f64]) -> Option<impl Fn(f64) -> f64 + '_> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt();
    let bandwidth = std * (n as f64).powf(-0.2);
    if bandwidth.is_nan() || bandwidth <= 0.0 {
        return None;
    }

    let kernel = Normal::new(0.0, 1.0).ok()?;
    Some(move |x: f64| {
        values
            .iter()
            .map(|v| kernel.pdf((x - v) / bandwidth))
            .sum::<f64>()
            / (n as f64 * bandwidth)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;

    #[test]
    fn test_category_counts_first_appearance_order() {
        let records = vec![
            record(Some("Wet"), None, None, None),
            record(Some("Dry"), None, None, None),
            record(Some("Wet"), None, None, None),
            record(None, None, None, None),
        ];

        let counts = CategoryCounts::compute(&records, Dimension::RoadSurface);
        assert_eq!(
            counts.entries,
            vec![("Wet".to_string(), 2), ("Dry".to_string(), 1)]
        );
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.max_count(), 2);
    }

    #[test]
    fn test_histogram_24_bins_over_observed_range() {
        let hours: Vec<f64> = (0..24).map(f64::from).collect();
        let hist = HourHistogram::from_values(&hours, 24);

        assert_eq!(hist.counts.len(), 24);
        assert_eq!(hist.edges.len(), 25);
        assert_eq!(hist.edges[0], 0.0);
        assert_eq!(hist.edges[24], 23.0);
        assert_eq!(hist.total(), 24);
        // 23 lands in the closed last bin
        assert!(hist.counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_histogram_skips_missing_hours() {
        let records = vec![
            record(None, None, None, Some(14)),
            record(None, None, None, None),
            record(None, None, None, Some(8)),
        ];
        let hist = HourHistogram::compute(&records, 24);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_density_integrates_to_sample_size() {
        let values = [8.0, 9.0, 9.0, 12.0, 17.0, 17.0, 18.0];
        let hist = HourHistogram::from_values(&values, 24);
        let density = hist.density.as_ref().unwrap();
        assert_eq!(density.len(), DENSITY_GRID_POINTS);

        // Over the observed range the scaled curve holds most of the mass.
        let step = density[1].0 - density[0].0;
        let area: f64 = density.iter().map(|(_, y)| y * step).sum::<f64>() / hist.bin_width();
        assert!(area > 0.5 * values.len() as f64);
        assert!(area < 1.1 * values.len() as f64);
    }

    #[test]
    fn test_degenerate_samples_have_no_density() {
        assert!(HourHistogram::from_values(&[], 24).density.is_none());
        assert!(HourHistogram::from_values(&[14.0], 24).density.is_none());
        assert!(HourHistogram::from_values(&[14.0, 14.0], 24).density.is_none());

        let single = HourHistogram::from_values(&[14.0], 24);
        assert_eq!(single.total(), 1);
        assert_eq!(single.edges[0], 13.5);
    }
}
