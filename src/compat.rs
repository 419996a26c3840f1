//! Sentinel-returning entry points over untyped JSON-shaped input.
//!
//! Scripts that hand over arbitrary data (possibly not a table at all) use
//! these wrappers. Shape problems never raise: dimensions come back as
//! `-1`, aggregates as `0`, and tables as `[]`. The typed functions in
//! [`crate::data`] do the actual work.
//!
//! Numeric checks see non-string, non-number values through their text
//! (`true` → `"true"`, arrays joined with commas), so they never count as
//! numbers unless that text does. Slicing never converts: cells come back
//! exactly as given and matching compares JSON values type-sensitively.
//! Numbers that are not finite, such as the `NaN` produced by coercing a
//! blank cell, are written back as `null`.

use std::path::Path;

use serde_json::Value;

use crate::data::loader::{self, LoadOptions};
use crate::data::model::{Cell, Row, Table};
use crate::data::numeric::{is_valid_number, NumericPolicy};
use crate::data::{shape, stats};

// ---------------------------------------------------------------------------
// Value <-> Cell
// ---------------------------------------------------------------------------

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n.as_f64().unwrap_or(f64::NAN)),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => text_of(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip text, switching to exponent form (`1e+21`, `1e-7`)
/// outside `1e-6 <= |v| < 1e21`.
fn number_text(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&v.abs()) {
        return format!("{v}");
    }
    let text = format!("{v:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

fn cell_of(value: &Value) -> Cell {
    match value {
        Value::Number(n) => Cell::Number(n.as_f64().unwrap_or(f64::NAN)),
        other => Cell::Text(text_of(other)),
    }
}

fn json_of(cell: &Cell) -> Value {
    match cell {
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Number(v) => Value::from(*v),
    }
}

fn table_to_json(table: &[Row]) -> Value {
    Value::Array(
        table
            .iter()
            .map(|row| Value::Array(row.iter().map(json_of).collect()))
            .collect(),
    )
}

/// Rows of `value` when it is an array of arrays.
fn rows_of(value: &Value) -> Option<Table> {
    value
        .as_array()?
        .iter()
        .map(|row| row.as_array().map(|cells| cells.iter().map(cell_of).collect()))
        .collect()
}

/// Elements of `value` when it is a flat array.
fn dataset_of(value: &Value) -> Option<Vec<Cell>> {
    let items = value.as_array()?;
    if items.iter().any(Value::is_array) {
        log::warn!("aggregate input is nested; returning 0");
        return None;
    }
    Some(items.iter().map(cell_of).collect())
}

// ---------------------------------------------------------------------------
// Validator / shape
// ---------------------------------------------------------------------------

pub fn valid_number(value: &Value) -> bool {
    is_valid_number(&cell_of(value))
}

/// `[rows, columns]`; `[-1, -1]` for anything but a non-empty array, and a
/// column count of `-1` when the first row is not an array.
pub fn data_dimensions(value: &Value) -> [i64; 2] {
    match value.as_array() {
        Some(rows) if !rows.is_empty() => {
            let columns = rows[0].as_array().map_or(-1, |first| first.len() as i64);
            [rows.len() as i64, columns]
        }
        _ => [-1, -1],
    }
}

pub fn flatten(value: &Value) -> Vec<f64> {
    rows_of(value)
        .map(|table| shape::flatten(&table))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Convert string cells of column `col` (row 0 excluded) in place.
pub fn convert_to_number(value: &mut Value, col: i64) -> usize {
    let (Some(rows), Ok(col)) = (value.as_array_mut(), usize::try_from(col)) else {
        return 0;
    };
    let mut converted = 0;
    for row in rows.iter_mut().skip(1) {
        let Some(cell) = row.as_array_mut().and_then(|cells| cells.get_mut(col)) else {
            continue;
        };
        let number = match cell {
            Value::String(text) => NumericPolicy::Loose.coerce(&Cell::Text(text.clone())),
            _ => None,
        };
        if let Some(number) = number {
            *cell = Value::from(number);
            converted += 1;
        }
    }
    converted
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

pub fn find_total(value: &Value) -> f64 {
    dataset_of(value).map_or(0.0, |data| stats::find_total(&data))
}

pub fn calculate_mean(value: &Value) -> f64 {
    dataset_of(value).map_or(0.0, |data| stats::calculate_mean(&data))
}

pub fn calculate_median(value: &Value) -> f64 {
    dataset_of(value).map_or(0.0, |data| stats::calculate_median(&data))
}

// ---------------------------------------------------------------------------
// Slicing
// ---------------------------------------------------------------------------

/// Filter rows by `pattern` on `column` and project `export` columns.
/// Returns `[]` unless `value` is an array of arrays and `column` is within
/// the first row's width. Cells are copied unchanged; a projected column a
/// short row lacks comes back as `null`.
pub fn create_slice(value: &Value, column: i64, pattern: &Value, export: &[i64]) -> Value {
    let empty = || Value::Array(Vec::new());
    let Some(rows) = value
        .as_array()
        .and_then(|rows| rows.iter().map(Value::as_array).collect::<Option<Vec<_>>>())
    else {
        return empty();
    };
    let Some(width) = rows.first().map(|row| row.len()) else {
        return empty();
    };
    let column = match usize::try_from(column) {
        Ok(c) if c < width => c,
        _ => {
            log::warn!("create_slice: column {column} out of bounds for width {width}");
            return empty();
        }
    };
    let columns: Vec<usize> = export
        .iter()
        .filter_map(|&c| usize::try_from(c).ok())
        .filter(|&c| c < width)
        .collect();
    let wildcard = pattern.as_str() == Some("*");

    Value::Array(
        rows.into_iter()
            .filter(|row| wildcard || row.get(column).is_some_and(|cell| same_value(cell, pattern)))
            .map(|row| {
                if columns.is_empty() {
                    Value::Array(row.clone())
                } else {
                    Value::Array(
                        columns
                            .iter()
                            .map(|&c| row.get(c).cloned().unwrap_or(Value::Null))
                            .collect(),
                    )
                }
            })
            .collect(),
    )
}

/// Type-sensitive equality. Numbers compare by value whatever their JSON
/// representation; arrays and objects never equal a separately supplied value.
fn same_value(cell: &Value, pattern: &Value) -> bool {
    match (cell, pattern) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(_) | Value::Object(_), _) => false,
        _ => cell == pattern,
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn file_exists(path: &Path) -> bool {
    loader::file_exists(path)
}

/// `(table, total_rows, total_columns)`, or `([], -1, -1)` when the file
/// cannot be read. `total_columns` is `-1` for a file with no rows.
pub fn load_csv(path: &Path, skip_rows: &[usize], skip_columns: &[usize]) -> (Value, i64, i64) {
    let options = LoadOptions {
        skip_rows: skip_rows.to_vec(),
        skip_columns: skip_columns.to_vec(),
    };
    match loader::load_csv(path, &options) {
        Ok(loaded) => (
            table_to_json(&loaded.table),
            loaded.total_rows as i64,
            loaded.total_columns.map_or(-1, |c| c as i64),
        ),
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            (Value::Array(Vec::new()), -1, -1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_number_on_json_values() {
        assert!(valid_number(&json!("-3.25")));
        assert!(valid_number(&json!(42)));
        assert!(!valid_number(&json!("+5")));
        assert!(!valid_number(&json!("5.")));
        assert!(!valid_number(&json!(true)));
        assert!(!valid_number(&json!(null)));
        assert!(!valid_number(&json!({"a": 1})));
        assert!(valid_number(&json!(["7"])));
        assert!(!valid_number(&json!([1e21])));
        assert!(valid_number(&json!([1e-7])));
        assert!(valid_number(&json!([0.000001])));
    }

    #[test]
    fn number_text_uses_exponent_outside_plain_range() {
        assert_eq!(number_text(1e21), "1e+21");
        assert_eq!(number_text(-2.5e22), "-2.5e+22");
        assert_eq!(number_text(1.5e-7), "1.5e-7");
        assert_eq!(number_text(0.000001), "0.000001");
        assert_eq!(number_text(123.0), "123");
        assert_eq!(number_text(-0.0), "0");
        assert_eq!(number_text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn dimensions_sentinels() {
        assert_eq!(data_dimensions(&json!([])), [-1, -1]);
        assert_eq!(data_dimensions(&json!(null)), [-1, -1]);
        assert_eq!(data_dimensions(&json!([["a", "b"], ["c", "d"]])), [2, 2]);
        assert_eq!(data_dimensions(&json!([[]])), [1, 0]);
        assert_eq!(data_dimensions(&json!(["a", ["b"]])), [2, -1]);
    }

    #[test]
    fn aggregates_reject_nested_or_non_arrays() {
        assert_eq!(find_total(&json!(["1", "2", "x", "3"])), 6.0);
        assert_eq!(find_total(&json!([["1"], ["2"]])), 0.0);
        assert_eq!(find_total(&json!("12")), 0.0);
        assert_eq!(calculate_mean(&json!([])), 0.0);
        assert_eq!(calculate_mean(&json!(["2", "4", 6])), 4.0);
        assert_eq!(calculate_median(&json!(["3", "1", "2"])), 2.0);
        assert_eq!(calculate_median(&json!(["1", "2", "3", "4"])), 2.5);
        assert_eq!(calculate_median(&json!([1, [2]])), 0.0);
    }

    #[test]
    fn flatten_requires_single_column_rows() {
        assert_eq!(flatten(&json!([["1"], ["2"], ["x"]])), vec![1.0, 2.0]);
        assert!(flatten(&json!([["1"], "2"])).is_empty());
        assert!(flatten(&json!([["1", "2"]])).is_empty());
        assert!(flatten(&json!({"rows": 1})).is_empty());
    }

    #[test]
    fn convert_mutates_in_place() {
        let mut table = json!([["n"], ["1"], ["+2"], ["x"], [3], [""]]);
        assert_eq!(convert_to_number(&mut table, 0), 3);
        assert_eq!(table, json!([["n"], [1.0], [2.0], ["x"], [3], [null]]));
        assert_eq!(convert_to_number(&mut table, 0), 0);
        assert_eq!(convert_to_number(&mut table, -1), 0);
    }

    #[test]
    fn slice_with_sentinels() {
        let table = json!([["h1", "h2"], ["a", "1"], ["b", "2"]]);
        assert_eq!(create_slice(&table, 0, &json!("a"), &[]), json!([["a", "1"]]));
        assert_eq!(create_slice(&table, 0, &json!("a"), &[1]), json!([["1"]]));
        assert_eq!(create_slice(&table, 0, &json!("*"), &[]), table);
        assert_eq!(create_slice(&table, 0, &json!("*"), &[-1, 7]), table);
        assert_eq!(create_slice(&table, -1, &json!("a"), &[]), json!([]));
        assert_eq!(create_slice(&table, 2, &json!("a"), &[]), json!([]));
        assert_eq!(create_slice(&json!([["a"], "b"]), 0, &json!("a"), &[]), json!([]));
        assert_eq!(create_slice(&table, 1, &json!(1), &[]), json!([]));
        assert_eq!(create_slice(&json!([]), 0, &json!("*"), &[]), json!([]));
    }

    #[test]
    fn slice_keeps_cells_and_types_intact() {
        let table = json!([["h"], [true], [null], [{"k": 1}]]);
        assert_eq!(create_slice(&table, 0, &json!("*"), &[]), table);

        let text = json!([["h"], ["true"], ["null"]]);
        assert_eq!(create_slice(&text, 0, &json!(true), &[]), json!([]));
        assert_eq!(create_slice(&text, 0, &json!(null), &[]), json!([]));
        assert_eq!(create_slice(&table, 0, &json!(true), &[]), json!([[true]]));
        assert_eq!(create_slice(&table, 0, &json!(null), &[]), json!([[null]]));
        assert_eq!(create_slice(&table, 0, &json!({"k": 1}), &[]), json!([]));
    }

    #[test]
    fn slice_matches_numbers_by_value_and_pads_with_null() {
        let table = json!([["id", "v"], [1, "a"], [2.0, "b"], [3]]);
        assert_eq!(create_slice(&table, 0, &json!(1.0), &[1]), json!([["a"]]));
        assert_eq!(create_slice(&table, 0, &json!(2), &[1, 0]), json!([["b", 2.0]]));
        assert_eq!(create_slice(&table, 0, &json!(3), &[1]), json!([[null]]));
    }

    #[test]
    fn load_missing_file_is_sentinel() {
        let (table, rows, cols) = load_csv(Path::new("/definitely/not/here.csv"), &[], &[]);
        assert_eq!(table, json!([]));
        assert_eq!((rows, cols), (-1, -1));
        assert!(!file_exists(Path::new("/definitely/not/here.csv")));
    }
}
