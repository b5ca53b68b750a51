use thiserror::Error;

/// Convenience result type for loading and analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned by loading, analysis and profiling functions.
///
/// A single enum is shared across the crate so callers only match on one type.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Underlying I/O error (file not found, permission denied, invalid UTF-8).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has a header row but no data rows, so there is no first record to take the
    /// column names from.
    #[error("empty dataset: the file has no data rows")]
    EmptyDataset,

    /// The analyzed column position does not exist.
    #[error("no column at position {index}. columns={columns:?}")]
    ColumnOutOfRange { index: usize, columns: Vec<String> },

    /// The analyzed column holds no numeric cell, so its mean is undefined.
    #[error("column '{column}' has no numeric values")]
    NoNumericData { column: String },

    /// Profile serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
