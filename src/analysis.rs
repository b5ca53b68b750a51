//! Single-file analysis: row count, column names and the mean of the second column.
//!
//! The analyzed column is always the one at ordinal position 1 of the first record's keys,
//! whatever it contains. Only cells that inferred as [`Value::Number`] take part in the mean.
//!
//! All computation happens before anything is written, so a failed analysis leaves the output
//! sink untouched.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::ingestion::csv::read_csv_from_path;
use crate::ingestion::observability::{AnalysisContext, AnalysisObserver, AnalysisSeverity, AnalysisStats};
use crate::processing::{mean, numeric_values_at};
use crate::types::{DataSet, Value};

/// Ordinal position of the analyzed column.
pub const NUMERIC_COLUMN_INDEX: usize = 1;

/// What to do with a file that has a header but no data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDatasetPolicy {
    /// Fail with [`AnalysisError::EmptyDataset`] (default).
    #[default]
    Fail,
    /// Take the column names from the header line and carry on. With no rows there is nothing
    /// numeric to average, so analysis then ends in [`AnalysisError::NoNumericData`].
    HeaderFallback,
}

/// Options controlling analysis behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct AnalysisOptions {
    /// Behavior for header-only files.
    pub empty_dataset: EmptyDatasetPolicy,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn AnalysisObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: AnalysisSeverity,
}

impl fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("empty_dataset", &self.empty_dataset)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            empty_dataset: EmptyDatasetPolicy::default(),
            observer: None,
            alert_at_or_above: AnalysisSeverity::Critical,
        }
    }
}

/// Result of analyzing one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Number of data rows.
    pub row_count: usize,
    /// Column names, in header order.
    pub columns: Vec<String>,
    /// Name of the analyzed column.
    pub numeric_column: String,
    /// How many cells of the analyzed column were numeric.
    pub numeric_count: usize,
    /// Arithmetic mean of those cells.
    pub mean: f64,
}

impl Analysis {
    fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            rows: self.row_count,
            columns: self.columns.len(),
            numeric_column: self.numeric_column.clone(),
            numeric_values: self.numeric_count,
            mean: self.mean,
        }
    }
}

/// Analyze the CSV file at `path` with default options and write the report to `out`.
///
/// ```no_run
/// # fn main() -> Result<(), csv_insight::AnalysisError> {
/// let analysis = csv_insight::analyze("data.csv", &mut std::io::stdout())?;
/// assert!(analysis.numeric_count > 0);
/// # Ok(())
/// # }
/// ```
pub fn analyze<W: Write>(path: impl AsRef<Path>, out: &mut W) -> AnalysisResult<Analysis> {
    analyze_with_options(path, out, &AnalysisOptions::default())
}

/// Analyze the CSV file at `path` and write the report to `out`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column/numeric-cell stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn analyze_with_options<W: Write>(
    path: impl AsRef<Path>,
    out: &mut W,
    options: &AnalysisOptions,
) -> AnalysisResult<Analysis> {
    let path = path.as_ref();
    let ctx = AnalysisContext {
        path: path.to_path_buf(),
    };

    let result = read_csv_from_path(path)
        .and_then(|ds| analyze_dataset(&ds, options))
        .and_then(|analysis| {
            report(&analysis, out)?;
            Ok(analysis)
        });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(analysis) => obs.on_success(&ctx, &analysis.stats()),
            Err(e) => {
                let sev = AnalysisSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Compute the [`Analysis`] of an already-parsed dataset without writing anything.
pub fn analyze_dataset(dataset: &DataSet, options: &AnalysisOptions) -> AnalysisResult<Analysis> {
    let columns: Vec<String> = match dataset.record(0) {
        Some(first) => first.keys().map(str::to_owned).collect(),
        None => match options.empty_dataset {
            EmptyDatasetPolicy::Fail => return Err(AnalysisError::EmptyDataset),
            EmptyDatasetPolicy::HeaderFallback => dataset.columns.clone(),
        },
    };

    let numeric_column = columns
        .get(NUMERIC_COLUMN_INDEX)
        .cloned()
        .ok_or_else(|| AnalysisError::ColumnOutOfRange {
            index: NUMERIC_COLUMN_INDEX,
            columns: columns.clone(),
        })?;

    let values = numeric_values_at(dataset, NUMERIC_COLUMN_INDEX);
    let avg = mean(&values).ok_or_else(|| AnalysisError::NoNumericData {
        column: numeric_column.clone(),
    })?;

    Ok(Analysis {
        row_count: dataset.row_count(),
        columns,
        numeric_column,
        numeric_count: values.len(),
        mean: avg,
    })
}

/// Write the three report lines for `analysis` to `out`.
pub fn report<W: Write>(analysis: &Analysis, out: &mut W) -> AnalysisResult<()> {
    let columns = analysis
        .columns
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "Total Rows: {}", analysis.row_count)?;
    writeln!(out, "Columns: [{columns}]")?;
    writeln!(
        out,
        "Average of {}: {}",
        analysis.numeric_column,
        Value::Number(analysis.mean)
    )?;
    out.flush()?;
    Ok(())
}
