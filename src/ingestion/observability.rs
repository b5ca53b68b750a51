//! Observer hooks for analysis outcomes.
//!
//! [`crate::analysis::analyze_with_options`] reports every run to an optional
//! [`AnalysisObserver`]. Each outcome is also available as an [`AnalysisEvent`], whose
//! `Display` form is the one-line log record written by [`StdErrObserver`] and [`FileObserver`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AnalysisError;

/// Severity of a failed analysis, used for alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisSeverity {
    /// The input was readable but could not be analyzed (empty, too few columns, nothing numeric).
    Error,
    /// The input could not be read at all.
    Critical,
}

impl AnalysisSeverity {
    /// Severity of a failed analysis.
    ///
    /// I/O faults, including I/O surfaced through the CSV reader, are `Critical`.
    pub fn for_error(e: &AnalysisError) -> Self {
        match e {
            AnalysisError::Io(_) => Self::Critical,
            AnalysisError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => Self::Critical,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for AnalysisSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// Context about an analysis attempt.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// The input path.
    pub path: PathBuf,
}

/// Stats reported on successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisStats {
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Name of the averaged column.
    pub numeric_column: String,
    /// Number of numeric cells that went into the mean.
    pub numeric_values: usize,
    pub mean: f64,
}

/// One analysis outcome, as handed to [`AnalysisObserver::on_event`].
#[derive(Debug, Clone, Copy)]
pub enum AnalysisEvent<'a> {
    Succeeded {
        ctx: &'a AnalysisContext,
        stats: &'a AnalysisStats,
    },
    Failed {
        ctx: &'a AnalysisContext,
        severity: AnalysisSeverity,
        error: &'a AnalysisError,
    },
    Alert {
        ctx: &'a AnalysisContext,
        severity: AnalysisSeverity,
        error: &'a AnalysisError,
    },
}

impl fmt::Display for AnalysisEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { ctx, stats } => write!(
                f,
                "ok path={} rows={} columns={} column={} numeric={} mean={}",
                ctx.path.display(),
                stats.rows,
                stats.columns,
                stats.numeric_column,
                stats.numeric_values,
                stats.mean
            ),
            Self::Failed { ctx, severity, error } => {
                write!(f, "fail severity={severity} path={} err={error}", ctx.path.display())
            }
            Self::Alert { ctx, severity, error } => {
                write!(f, "ALERT severity={severity} path={} err={error}", ctx.path.display())
            }
        }
    }
}

/// Observer interface for analysis outcomes.
///
/// Implement [`Self::on_event`] to see every outcome in one place, or override the specific
/// callbacks. The callbacks default to building the matching [`AnalysisEvent`].
pub trait AnalysisObserver: Send + Sync {
    fn on_event(&self, _event: &AnalysisEvent<'_>) {}

    fn on_success(&self, ctx: &AnalysisContext, stats: &AnalysisStats) {
        self.on_event(&AnalysisEvent::Succeeded { ctx, stats });
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        self.on_event(&AnalysisEvent::Failed { ctx, severity, error });
    }

    /// Called after [`Self::on_failure`] when the severity meets the alert threshold.
    fn on_alert(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        self.on_event(&AnalysisEvent::Alert { ctx, severity, error });
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn AnalysisObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn AnalysisObserver>>) -> Self {
        Self { observers }
    }

    fn each(&self, f: impl Fn(&dyn AnalysisObserver)) {
        self.observers.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl AnalysisObserver for CompositeObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        self.each(|o| o.on_event(event));
    }

    fn on_success(&self, ctx: &AnalysisContext, stats: &AnalysisStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Writes each event as a `[csv-insight] ...` line on stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl AnalysisObserver for StdErrObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        eprintln!("[csv-insight] {event}");
    }
}

/// Appends timestamped events to a log file.
///
/// The file is opened once, in append mode, when the observer is created. Logging is
/// best-effort: if the file cannot be opened or written, events are dropped.
#[derive(Debug)]
pub struct FileObserver {
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path).ok();
        Self {
            file: Mutex::new(file),
        }
    }
}

impl AnalysisObserver for FileObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = writeln!(file, "{ts} {event}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{AnalysisContext, AnalysisEvent, AnalysisSeverity, AnalysisStats};
    use crate::error::AnalysisError;

    #[test]
    fn io_errors_are_critical_and_data_errors_are_not() {
        let io = AnalysisError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(AnalysisSeverity::for_error(&io), AnalysisSeverity::Critical);
        assert_eq!(
            AnalysisSeverity::for_error(&AnalysisError::EmptyDataset),
            AnalysisSeverity::Error
        );
        let no_numbers = AnalysisError::NoNumericData {
            column: "score".to_string(),
        };
        assert_eq!(AnalysisSeverity::for_error(&no_numbers), AnalysisSeverity::Error);
        assert!(AnalysisSeverity::Critical > AnalysisSeverity::Error);
    }

    #[test]
    fn events_render_as_log_lines() {
        let ctx = AnalysisContext {
            path: PathBuf::from("data.csv"),
        };
        let stats = AnalysisStats {
            rows: 3,
            columns: 2,
            numeric_column: "score".to_string(),
            numeric_values: 3,
            mean: 2.5,
        };
        assert_eq!(
            AnalysisEvent::Succeeded { ctx: &ctx, stats: &stats }.to_string(),
            "ok path=data.csv rows=3 columns=2 column=score numeric=3 mean=2.5"
        );

        let error = AnalysisError::EmptyDataset;
        let failed = AnalysisEvent::Failed {
            ctx: &ctx,
            severity: AnalysisSeverity::Error,
            error: &error,
        };
        assert_eq!(
            failed.to_string(),
            "fail severity=error path=data.csv err=empty dataset: the file has no data rows"
        );
    }
}
