//! Column profiling: completeness, uniqueness, frequent values, text lengths and numeric
//! summaries, plus table-level quality scores and primary-key candidates.
//!
//! ```rust
//! use csv_insight::ingestion::parse_csv_str;
//! use csv_insight::profile::profile_dataset;
//!
//! let ds = parse_csv_str("id,score\n1,10\n2,\n2,\n").unwrap();
//! let profile = profile_dataset(&ds);
//! assert_eq!(profile.duplicate_rows, 1);
//! assert_eq!(profile.columns[1].null_count, 2);
//! assert_eq!(profile.completeness_pct, 100.0 - 2.0 / 6.0 * 100.0);
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::AnalysisResult;
use crate::processing::mean;
use crate::types::{DataSet, Value, ValueKind};

/// Number of entries kept in [`ColumnProfile::top_values`].
pub const TOP_VALUES: usize = 5;

/// Profile of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    /// Rows identical to an earlier row.
    pub duplicate_rows: usize,
    /// Share of non-absent cells over the whole table, in percent.
    pub completeness_pct: f64,
    /// Mean of the per-column [`ColumnProfile::uniqueness_pct`].
    pub uniqueness_pct: f64,
    /// Columns whose values are all present and all distinct, in header order.
    pub primary_key_candidates: Vec<String>,
    pub columns: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Pretty-printed JSON rendering of the profile.
    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Profile of one column.
///
/// Length statistics are measured in characters over non-absent cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Most frequent non-absent kind; `Absent` when the column is entirely empty.
    pub kind: ValueKind,
    pub null_count: usize,
    pub null_pct: f64,
    /// Distinct non-absent values.
    pub unique_count: usize,
    pub uniqueness_pct: f64,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub avg_length: Option<f64>,
    /// Most frequent non-absent values, at most [`TOP_VALUES`], most frequent first.
    pub top_values: Vec<ValueCount>,
    /// Present when every non-absent cell is numeric.
    pub numeric: Option<NumericSummary>,
}

impl ColumnProfile {
    /// Every row holds a value and no value repeats.
    pub fn is_key_candidate(&self, rows: usize) -> bool {
        rows > 0 && self.null_count == 0 && self.unique_count == rows
    }
}

/// How often one value occurs in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1). `None` for fewer than two values.
    pub std_dev: Option<f64>,
}

/// Profile every column of `dataset`.
pub fn profile_dataset(dataset: &DataSet) -> DatasetProfile {
    let rows = dataset.row_count();
    let columns: Vec<ColumnProfile> = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| profile_column(dataset, idx, name))
        .collect();

    let nulls = columns.iter().map(|c| c.null_count).sum::<usize>();
    let completeness_pct = if rows == 0 || columns.is_empty() {
        0.0
    } else {
        100.0 - percentage(nulls, rows * columns.len())
    };
    let uniqueness: Vec<f64> = columns.iter().map(|c| c.uniqueness_pct).collect();
    let uniqueness_pct = if rows == 0 {
        0.0
    } else {
        mean(&uniqueness).unwrap_or(0.0)
    };
    let primary_key_candidates = columns
        .iter()
        .filter(|c| c.is_key_candidate(rows))
        .map(|c| c.name.clone())
        .collect();

    DatasetProfile {
        row_count: rows,
        column_count: dataset.columns.len(),
        duplicate_rows: count_duplicate_rows(dataset),
        completeness_pct,
        uniqueness_pct,
        primary_key_candidates,
        columns,
    }
}

fn profile_column(dataset: &DataSet, idx: usize, name: &str) -> ColumnProfile {
    let rows = dataset.row_count();
    let cells: Vec<&Value> = dataset.rows.iter().filter_map(|row| row.get(idx)).collect();
    let present: Vec<&Value> = cells.iter().copied().filter(|v| !v.is_absent()).collect();
    let null_count = cells.len() - present.len();

    let top = value_counts(&present);
    let unique_count = top.len();

    let lengths: Vec<usize> = present.iter().map(|v| v.to_string().chars().count()).collect();
    let avg_length = if lengths.is_empty() {
        None
    } else {
        Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
    };

    let numbers: Vec<f64> = present.iter().filter_map(|v| v.as_number()).collect();
    let numeric = if !numbers.is_empty() && numbers.len() == present.len() {
        summarize_numbers(&numbers)
    } else {
        None
    };

    ColumnProfile {
        name: name.to_owned(),
        kind: dominant_kind(&present),
        null_count,
        null_pct: percentage(null_count, rows),
        unique_count,
        uniqueness_pct: percentage(unique_count, rows),
        min_length: lengths.iter().copied().min(),
        max_length: lengths.iter().copied().max(),
        avg_length,
        top_values: top.into_iter().take(TOP_VALUES).collect(),
        numeric,
    }
}

/// Counts of each distinct value, most frequent first. Ties keep first-seen order.
fn value_counts(present: &[&Value]) -> Vec<ValueCount> {
    let mut slots: HashMap<(ValueKind, String), usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();
    for v in present {
        let key = value_key(v);
        match slots.get(&key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(key, counts.len());
                counts.push(ValueCount {
                    value: v.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn summarize_numbers(values: &[f64]) -> Option<NumericSummary> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let avg = mean(&sorted)?;
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let std_dev = (sorted.len() >= 2).then(|| {
        let var = sorted.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (sorted.len() - 1) as f64;
        var.sqrt()
    });

    Some(NumericSummary {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: avg,
        median,
        std_dev,
    })
}

fn dominant_kind(present: &[&Value]) -> ValueKind {
    let mut counts: HashMap<ValueKind, usize> = HashMap::new();
    for v in present {
        *counts.entry(v.kind()).or_default() += 1;
    }

    // Ties resolve in this order.
    let mut best = ValueKind::Absent;
    let mut best_count = 0;
    for kind in [ValueKind::Number, ValueKind::Bool, ValueKind::Text] {
        let n = counts.get(&kind).copied().unwrap_or(0);
        if n > best_count {
            best = kind;
            best_count = n;
        }
    }
    best
}

fn count_duplicate_rows(dataset: &DataSet) -> usize {
    let mut seen: HashSet<Vec<(ValueKind, String)>> = HashSet::with_capacity(dataset.row_count());
    dataset
        .rows
        .iter()
        .filter(|row| !seen.insert(row.iter().map(value_key).collect()))
        .count()
}

fn value_key(v: &Value) -> (ValueKind, String) {
    (v.kind(), v.to_string())
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
