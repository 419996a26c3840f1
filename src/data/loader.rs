use std::path::Path;

use serde::Serialize;

use super::model::{Cell, Row, Table};
use crate::error::FrameError;

// ---------------------------------------------------------------------------
// Options / result
// ---------------------------------------------------------------------------

/// Rows and columns to drop while loading. Indices refer to the source file
/// after blank lines are removed.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub skip_rows: Vec<usize>,
    pub skip_columns: Vec<usize>,
}

/// A loaded table plus the dimensions of the unfiltered source.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTable {
    pub table: Table,
    /// Non-blank lines in the source, before `skip_rows` is applied.
    pub total_rows: usize,
    /// Fields on the first non-blank line; `None` for a file without rows.
    pub total_columns: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

/// Load a comma-separated file into a table of text cells.
///
/// Lines end at `\n` (an `\r` directly before it is dropped; a lone `\r`
/// is ordinary text). Fields are split on every comma: quotes have no
/// special meaning and there is no header handling. Lines that are blank
/// after trimming are ignored entirely.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<LoadedTable, FrameError> {
    if !file_exists(path) {
        return Err(FrameError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    let mut table = Table::new();
    let mut total_rows = 0;
    let mut total_columns = None;

    for result in reader.records() {
        let record = result?;
        let mut fields: Vec<&str> = record.iter().collect();
        if let Some(last) = fields.last_mut() {
            let field = *last;
            *last = field.strip_suffix('\r').unwrap_or(field);
        }
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }

        let row_index = total_rows;
        total_rows += 1;
        total_columns.get_or_insert(fields.len());

        if options.skip_rows.contains(&row_index) {
            continue;
        }
        let row: Row = fields
            .into_iter()
            .enumerate()
            .filter(|(col, _)| !options.skip_columns.contains(col))
            .map(|(_, field)| Cell::from(field))
            .collect();
        table.push(row);
    }

    log::info!(
        "Loaded {} of {total_rows} row(s) from {}",
        table.len(),
        path.display()
    );

    Ok(LoadedTable {
        table,
        total_rows,
        total_columns,
    })
}
