//! CSV loading and per-cell type inference.

use std::path::Path;

use crate::error::AnalysisResult;
use crate::types::{DataSet, Value};

/// Numbers must stay strictly below this magnitude (2^53) to be inferred as numeric.
const NUMERIC_MAGNITUDE_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Load a CSV file into an in-memory [`DataSet`].
///
/// The whole file is read as UTF-8 text before parsing. A missing, unreadable or non-UTF-8 file
/// is reported as [`crate::AnalysisError::Io`].
pub fn read_csv_from_path(path: impl AsRef<Path>) -> AnalysisResult<DataSet> {
    let text = std::fs::read_to_string(path)?;
    parse_csv_str(&text)
}

/// Parse CSV text that is already in memory.
///
/// Rules:
///
/// - The first line is the header and defines the column names, in order.
/// - The delimiter is always a comma.
/// - Rows with too few cells are padded with [`Value::Absent`]; extra cells are dropped.
/// - Blank lines are skipped.
/// - Every cell goes through [`infer_value`].
pub fn parse_csv_str(text: &str) -> AnalysisResult<DataSet> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    parse_csv_from_reader(&mut rdr)
}

/// Parse CSV data from an existing CSV reader.
///
/// The reader should be configured with `has_headers(true)`; configure it with `flexible(true)`
/// to tolerate rows whose length differs from the header.
pub fn parse_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> AnalysisResult<DataSet> {
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(infer_value).collect());
    }

    Ok(DataSet::new(columns, rows))
}

/// Classify one raw cell.
///
/// - `""` becomes [`Value::Absent`].
/// - `true`/`TRUE` and `false`/`FALSE` become [`Value::Bool`].
/// - Plain decimal literals (`42`, `-3.14`, `.5`, `7.`, `1e3`, surrounding whitespace allowed)
///   with a magnitude below 2^53 become [`Value::Number`].
/// - Everything else is kept verbatim as [`Value::Text`].
pub fn infer_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Absent;
    }

    match raw {
        "true" | "TRUE" => return Value::Bool(true),
        "false" | "FALSE" => return Value::Bool(false),
        _ => {}
    }

    let trimmed = raw.trim();
    if is_decimal_literal(trimmed) {
        if let Ok(v) = trimmed.parse::<f64>() {
            if v.abs() < NUMERIC_MAGNITUDE_LIMIT {
                return Value::Number(v);
            }
        }
    }

    Value::Text(raw.to_owned())
}

/// Checks `s` against `-?(digits[.digits?] | .digits)([eE][+-]?digits)?`.
///
/// Rust's float parser alone is too lenient here (`inf`, `NaN`, `+1`).
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::{infer_value, parse_csv_str};
    use crate::types::Value;

    #[test]
    #[allow(clippy::approx_constant)]
    fn infer_integers_and_floats() {
        assert_eq!(infer_value("42"), Value::Number(42.0));
        assert_eq!(infer_value("3.14"), Value::Number(3.14));
        assert_eq!(infer_value("-7"), Value::Number(-7.0));
        assert_eq!(infer_value(".5"), Value::Number(0.5));
        assert_eq!(infer_value("7."), Value::Number(7.0));
        assert_eq!(infer_value("1e3"), Value::Number(1000.0));
        assert_eq!(infer_value("2.5E-1"), Value::Number(0.25));
        assert_eq!(infer_value(" 12 "), Value::Number(12.0));
    }

    #[test]
    fn infer_rejects_lenient_float_spellings() {
        for raw in ["NaN", "inf", "-inf", "+5", "0x10", "1_000", "1e", ".", "-", "1.2.3", "12abc"] {
            assert_eq!(infer_value(raw), Value::Text(raw.to_string()), "raw={raw}");
        }
    }

    #[test]
    fn infer_keeps_numbers_beyond_2_pow_53_as_text() {
        assert_eq!(infer_value("9007199254740991"), Value::Number(9_007_199_254_740_991.0));
        assert_eq!(infer_value("-9007199254740991"), Value::Number(-9_007_199_254_740_991.0));
        for raw in ["9007199254740992", "9007199254740993.0", "1e20", "-1e16"] {
            assert_eq!(infer_value(raw), Value::Text(raw.to_string()), "raw={raw}");
        }
    }

    #[test]
    fn infer_booleans_absent_and_text() {
        assert_eq!(infer_value("true"), Value::Bool(true));
        assert_eq!(infer_value("FALSE"), Value::Bool(false));
        assert_eq!(infer_value("TRUE"), Value::Bool(true));
        assert_eq!(infer_value("True"), Value::Text("True".to_string()));
        assert_eq!(infer_value("False"), Value::Text("False".to_string()));
        assert_eq!(infer_value("yes"), Value::Text("yes".to_string()));
        assert_eq!(infer_value("tRuE"), Value::Text("tRuE".to_string()));
        assert_eq!(infer_value(""), Value::Absent);
        assert_eq!(infer_value("abc"), Value::Text("abc".to_string()));
        assert_eq!(infer_value("  "), Value::Text("  ".to_string()));
    }

    #[test]
    fn parse_keeps_header_order_and_tolerates_ragged_rows() {
        let ds = parse_csv_str("b,a,c\n1,x\n2,y,true,extra\n").unwrap();
        assert_eq!(ds.columns, vec!["b", "a", "c"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(
            ds.rows[0],
            vec![Value::Number(1.0), Value::Text("x".into()), Value::Absent]
        );
        assert_eq!(
            ds.rows[1],
            vec![Value::Number(2.0), Value::Text("y".into()), Value::Bool(true)]
        );
    }

    #[test]
    fn parse_strips_bom_and_skips_blank_lines() {
        let ds = parse_csv_str("\u{feff}id,score\n1,2\n\n3,4\n").unwrap();
        assert_eq!(ds.columns, vec!["id", "score"]);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn parse_header_only_gives_empty_dataset() {
        let ds = parse_csv_str("id,score\n").unwrap();
        assert_eq!(ds.columns, vec!["id", "score"]);
        assert!(ds.is_empty());
    }

    #[test]
    fn parse_quoted_cells() {
        let ds = parse_csv_str("name,score\n\"Doe, Jane\",\"12.5\"\n").unwrap();
        assert_eq!(ds.rows[0][0], Value::Text("Doe, Jane".into()));
        assert_eq!(ds.rows[0][1], Value::Number(12.5));
    }
}
