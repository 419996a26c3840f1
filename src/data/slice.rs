use super::model::{Cell, Pattern, Row, Table};

/// Select rows whose `column` matches `pattern` and project `export` columns.
///
/// * The table width is the first row's length. A `column` outside it
///   yields an empty table, as does an empty input.
/// * `export` indices outside the width are discarded; if none remain the
///   rows are copied whole. Otherwise each row is rebuilt in `export` order
///   (duplicates allowed). Rows shorter than a requested column get an
///   empty text cell there.
pub fn create_slice(table: &[Row], column: usize, pattern: &Pattern, export: &[usize]) -> Table {
    let Some(width) = table.first().map(Vec::len) else {
        return Table::new();
    };
    if column >= width {
        log::warn!("create_slice: column {column} out of bounds for width {width}");
        return Table::new();
    }

    let columns: Vec<usize> = export.iter().copied().filter(|&c| c < width).collect();
    if columns.len() != export.len() {
        log::debug!(
            "create_slice: discarded {} export column(s) outside 0..{width}",
            export.len() - columns.len()
        );
    }

    table
        .iter()
        .filter(|row| pattern.matches(row.get(column)))
        .map(|row| project(row, &columns))
        .collect()
}

fn project(row: &Row, columns: &[usize]) -> Row {
    if columns.is_empty() {
        return row.clone();
    }
    columns
        .iter()
        .map(|&c| row.get(c).cloned().unwrap_or_default())
        .collect()
}
