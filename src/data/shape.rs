use super::model::{Cell, Row};
use super::numeric::NumericPolicy;

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// `(rows, columns)` of a table, or `None` when it has no rows.
///
/// Only the first row's width is consulted; ragged tables are reported as
/// if every row had that width.
pub fn data_dimensions(table: &[Row]) -> Option<(usize, usize)> {
    let first = table.first()?;
    Some((table.len(), first.len()))
}

// ---------------------------------------------------------------------------
// Flatten
// ---------------------------------------------------------------------------

/// Turn a single-column table into the numbers it holds, in row order.
///
/// Returns an empty vector unless every row has exactly one cell. Cells that
/// are not strictly numeric are dropped.
pub fn flatten(table: &[Row]) -> Vec<f64> {
    if table.iter().any(|row| row.len() != 1) {
        log::warn!("flatten: input is not a single-column table");
        return Vec::new();
    }
    table
        .iter()
        .filter_map(|row| NumericPolicy::Strict.coerce(&row[0]))
        .collect()
}

/// Cells of one column, skipping rows too short to have it.
pub fn column(table: &[Row], index: usize) -> Vec<Cell> {
    table.iter().filter_map(|row| row.get(index).cloned()).collect()
}
