//! Cross-tabulation of two categorical dimensions.

use crate::data::{AccidentRecord, Dimension};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Frequency matrix keyed by the sorted distinct values observed along two
/// dimensions. Labels sort numerically when every label on an axis is a
/// number, lexically otherwise. Unobserved categories are absent, not zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub row_dim: Dimension,
    pub col_dim: Dimension,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[row][col]`
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Count co-occurrences of `row_dim` and `col_dim`. Records missing either
    /// value are not counted.
    pub fn compute(records: &[AccidentRecord], row_dim: Dimension, col_dim: Dimension) -> Self {
        let mut cells: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        let mut rows: BTreeSet<&str> = BTreeSet::new();
        let mut cols: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            if let (Some(r), Some(c)) = (record.category(row_dim), record.category(col_dim)) {
                *cells.entry((r, c)).or_default() += 1;
                rows.insert(r);
                cols.insert(c);
            }
        }

        let rows = sorted_labels(rows);
        let cols = sorted_labels(cols);

        let counts = rows
            .iter()
            .map(|r| {
                cols.iter()
                    .map(|c| cells.get(&(*r, *c)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            row_dim,
            col_dim,
            row_labels: rows.iter().map(|l| l.to_string()).collect(),
            col_labels: cols.iter().map(|l| l.to_string()).collect(),
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    /// Count at (`row`, `col`) by label; `None` when either label is unobserved.
    pub fn get(&self, row: &str, col: &str) -> Option<u64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        Some(self.counts[r][c])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Largest cell value, 0 for an empty table.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn min_count(&self) -> u64 {
        self.counts.iter().flatten().copied().min().unwrap_or(0)
    }
}

fn sorted_labels(labels: BTreeSet<&str>) -> Vec<&str> {
    let numeric: Option<Vec<f64>> = labels.iter().map(|l| l.trim().parse().ok()).collect();
    let mut labels: Vec<&str> = labels.into_iter().collect();
    if let Some(values) = numeric {
        let mut keyed: Vec<(f64, &str)> = values.into_iter().zip(labels).collect();
        keyed.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(b.1))
        });
        labels = keyed.into_iter().map(|(_, l)| l).collect();
    }
    labels
}

impl fmt::Display for CrossTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_w = self
            .row_labels
            .iter()
            .map(String::len)
            .chain([self.row_dim.label().len(), self.col_dim.label().len()])
            .max()
            .unwrap_or(0);
        let col_ws: Vec<usize> = self
            .col_labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                self.counts
                    .iter()
                    .map(|row| row[c].to_string().len())
                    .chain(std::iter::once(label.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>row_w$}", self.col_dim.label())?;
        for (label, w) in self.col_labels.iter().zip(&col_ws) {
            write!(f, "  {label:>w$}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:<row_w$}", self.row_dim.label())?;

        for (label, row) in self.row_labels.iter().zip(&self.counts) {
            write!(f, "{label:<row_w$}")?;
            for (count, w) in row.iter().zip(&col_ws) {
                write!(f, "  {count:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
