//! Reduction operations for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including non-numeric cells).
    Count,
    /// Sum of numeric cells.
    Sum,
    /// Minimum numeric cell.
    Min,
    /// Maximum numeric cell.
    Max,
    /// Arithmetic mean of numeric cells.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist.
/// - Numeric ops only look at [`Value::Number`] cells; text, booleans and absent cells are
///   skipped, never coerced to zero.
/// - Numeric ops return `Some(Value::Absent)` if the column has no numeric cell.
/// - `Count` always returns `Some(Value::Number(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    dataset.index_of(column)?;

    let values = numeric_values(dataset, column);
    let result = match op {
        ReduceOp::Count => return Some(Value::Number(dataset.row_count() as f64)),
        ReduceOp::Sum => (!values.is_empty()).then(|| values.iter().sum::<f64>()),
        ReduceOp::Min => values.iter().copied().reduce(f64::min),
        ReduceOp::Max => values.iter().copied().reduce(f64::max),
        ReduceOp::Mean => mean(&values),
    };

    Some(result.map(Value::Number).unwrap_or(Value::Absent))
}

/// Numeric cells of `column`, in row order. Empty if the column does not exist.
pub fn numeric_values(dataset: &DataSet, column: &str) -> Vec<f64> {
    dataset
        .column_values(column)
        .filter_map(Value::as_number)
        .collect()
}

/// Numeric cells at column position `idx`, in row order. Empty if out of range.
pub fn numeric_values_at(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset
        .column_values_at(idx)
        .filter_map(Value::as_number)
        .collect()
}

/// Sum divided by count, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::{mean, numeric_values, numeric_values_at, reduce, ReduceOp};
    use crate::types::{DataSet, Value};

    fn mixed_dataset() -> DataSet {
        let columns = vec!["id".to_string(), "score".to_string()];
        let rows = vec![
            vec![Value::Number(1.0), Value::Number(10.0)],
            vec![Value::Number(2.0), Value::Text("x".to_string())],
            vec![Value::Number(3.0), Value::Number(30.0)],
            vec![Value::Number(4.0), Value::Absent],
            vec![Value::Number(5.0), Value::Bool(true)],
        ];
        DataSet::new(columns, rows)
    }

    #[test]
    fn reduce_count_counts_rows() {
        let ds = mixed_dataset();
        assert_eq!(reduce(&ds, "score", ReduceOp::Count), Some(Value::Number(5.0)));
    }

    #[test]
    fn reduce_numeric_ops_skip_non_numeric_cells() {
        let ds = mixed_dataset();
        assert_eq!(reduce(&ds, "score", ReduceOp::Sum), Some(Value::Number(40.0)));
        assert_eq!(reduce(&ds, "score", ReduceOp::Min), Some(Value::Number(10.0)));
        assert_eq!(reduce(&ds, "score", ReduceOp::Max), Some(Value::Number(30.0)));
        assert_eq!(reduce(&ds, "score", ReduceOp::Mean), Some(Value::Number(20.0)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Mean), Some(Value::Number(3.0)));
    }

    #[test]
    fn reduce_returns_none_for_missing_column() {
        let ds = mixed_dataset();
        assert_eq!(reduce(&ds, "missing", ReduceOp::Count), None);
        assert_eq!(reduce(&ds, "missing", ReduceOp::Mean), None);
    }

    #[test]
    fn reduce_numeric_returns_absent_without_numbers() {
        let columns = vec!["name".to_string()];
        let ds = DataSet::new(
            columns,
            vec![vec![Value::Text("a".to_string())], vec![Value::Absent]],
        );
        assert_eq!(reduce(&ds, "name", ReduceOp::Sum), Some(Value::Absent));
        assert_eq!(reduce(&ds, "name", ReduceOp::Min), Some(Value::Absent));
        assert_eq!(reduce(&ds, "name", ReduceOp::Mean), Some(Value::Absent));
    }

    #[test]
    fn numeric_values_keep_row_order() {
        assert_eq!(numeric_values(&mixed_dataset(), "score"), vec![10.0, 30.0]);
        assert_eq!(numeric_values_at(&mixed_dataset(), 1), vec![10.0, 30.0]);
        assert!(numeric_values_at(&mixed_dataset(), 2).is_empty());
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[10.0, 20.0, 30.0]), Some(20.0));
    }
}
