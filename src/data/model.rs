use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell – a single scalar in a table
// ---------------------------------------------------------------------------

/// A table cell: raw text as produced by the loader, or a number once
/// coerced.
///
/// Equality is type-sensitive, so `Text("1")` never equals `Number(1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Text(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

// ---------------------------------------------------------------------------
// Row / Table
// ---------------------------------------------------------------------------

/// One row of a table.
pub type Row = Vec<Cell>;

/// Ordered rows. Row 0 is a header only by convention; nothing here
/// enforces equal row lengths.
pub type Table = Vec<Row>;

/// Build a table of text cells from string literals.
pub fn table_from_strs(rows: &[&[&str]]) -> Table {
    rows.iter()
        .map(|row| row.iter().map(|&s| Cell::from(s)).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Pattern – row selector used by the slicer
// ---------------------------------------------------------------------------

/// Which rows a slice keeps, judged on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Wildcard `"*"`: every row.
    Any,
    /// Rows whose cell equals this value (type-sensitive).
    Exact(Cell),
}

impl Pattern {
    pub fn matches(&self, cell: Option<&Cell>) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Exact(expected) => cell == Some(expected),
        }
    }
}

impl From<Cell> for Pattern {
    fn from(cell: Cell) -> Self {
        match &cell {
            Cell::Text(s) if s == "*" => Pattern::Any,
            _ => Pattern::Exact(cell),
        }
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::from(Cell::from(s))
    }
}

impl From<f64> for Pattern {
    fn from(v: f64) -> Self {
        Pattern::Exact(Cell::Number(v))
    }
}
