//! In-memory column reductions.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by
//! [`crate::ingestion`]. Only cells that inferred as [`crate::types::Value::Number`] take part
//! in numeric reductions.
//!
//! ```rust
//! use csv_insight::ingestion::parse_csv_str;
//! use csv_insight::processing::{reduce, ReduceOp};
//! use csv_insight::types::Value;
//!
//! let ds = parse_csv_str("id,score\n1,10\n2,x\n3,30\n4,\n").unwrap();
//! assert_eq!(reduce(&ds, "score", ReduceOp::Mean), Some(Value::Number(20.0)));
//! assert_eq!(reduce(&ds, "score", ReduceOp::Count), Some(Value::Number(4.0)));
//! ```

pub mod reduce;

pub use reduce::{mean, numeric_values, numeric_values_at, reduce, ReduceOp};
