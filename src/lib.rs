//! `csv-insight` loads a CSV file into an in-memory [`types::DataSet`] with per-cell type
//! inference, reports its shape, and averages its second column.
//!
//! The primary entrypoint is [`analysis::analyze`], which writes a three-line report to any
//! [`std::io::Write`] sink:
//!
//! ```text
//! Total Rows: 3
//! Columns: ['id', 'score', 'name']
//! Average of score: 20
//! ```
//!
//! ## Type inference
//!
//! Every cell becomes a [`types::Value`]:
//!
//! - [`types::Value::Number`] for decimal literals (`42`, `3.14`, `1e3`)
//! - [`types::Value::Bool`] for `true`/`false` (also `TRUE`/`FALSE`)
//! - [`types::Value::Absent`] for empty cells
//! - [`types::Value::Text`] for everything else
//!
//! ## Column selection
//!
//! The averaged column is always the one at ordinal position 1, whatever it contains. Cells that
//! did not infer as numbers are skipped, not counted as zero.
//!
//! ## Quick example
//!
//! ```rust
//! use csv_insight::analysis::{analyze_dataset, report, AnalysisOptions};
//! use csv_insight::ingestion::parse_csv_str;
//!
//! let ds = parse_csv_str("id,score,name\n1,10,a\n2,x,b\n3,30,c\n4,,d\n").unwrap();
//! let analysis = analyze_dataset(&ds, &AnalysisOptions::default()).unwrap();
//! assert_eq!(analysis.numeric_column, "score");
//! assert_eq!(analysis.mean, 20.0);
//!
//! let mut out = Vec::new();
//! report(&analysis, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().ends_with("Average of score: 20\n"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading, type inference and observer hooks
//! - [`types`]: values, records and the dataset
//! - [`processing`]: column reductions (count/sum/min/max/mean)
//! - [`analysis`]: the row count / columns / mean report
//! - [`profile`]: per-column data-quality profile
//! - [`error`]: error type shared by all of the above

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod profile;
pub mod types;

pub use analysis::{analyze, analyze_with_options, Analysis, AnalysisOptions, EmptyDatasetPolicy};
pub use error::{AnalysisError, AnalysisResult};
