//! Loading entrypoints and observer hooks.
//!
//! - [`csv`]: whole-file CSV loading with per-cell type inference
//! - [`observability`]: [`AnalysisObserver`] and the stderr/file/composite implementations used
//!   by [`crate::analysis::analyze_with_options`]

pub mod csv;
pub mod observability;

pub use self::csv::{infer_value, parse_csv_from_reader, parse_csv_str, read_csv_from_path};
pub use observability::{
    AnalysisContext, AnalysisEvent, AnalysisObserver, AnalysisSeverity, AnalysisStats, CompositeObserver, FileObserver,
    StdErrObserver,
};
