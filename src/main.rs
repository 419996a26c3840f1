use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use rusty_frame::{
    column, convert_to_number, create_slice, data_dimensions, is_valid_number, load_csv, Aggregate,
    Cell, LoadOptions, NumericPolicy, Pattern, Row,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "rusty-frame")]
#[command(about = "Inspect, summarise and slice comma-separated data")]
#[command(version)]
struct Cli {
    /// Comma-separated input file
    file: PathBuf,

    /// Source row to drop while loading (repeatable)
    #[arg(long = "skip-row")]
    skip_rows: Vec<usize>,

    /// Source column to drop while loading (repeatable)
    #[arg(long = "skip-col")]
    skip_columns: Vec<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the loaded and source dimensions
    Dims,
    /// Total, mean and median of one column
    Stats {
        #[arg(long, short)]
        column: usize,
        /// Treat row 0 as a header and leave it out
        #[arg(long)]
        header: bool,
    },
    /// Rows whose column equals a pattern ("*" keeps every row)
    Slice {
        #[arg(long, short)]
        column: usize,
        #[arg(long, short)]
        pattern: String,
        /// Column to output, in order (repeatable; default all)
        #[arg(long, short)]
        export: Vec<usize>,
        /// Convert the column to numbers first and match the pattern as a number
        #[arg(long)]
        numeric: bool,
    },
    /// Convert numeric text in a column (row 0 excluded) and print the table
    Convert {
        #[arg(long, short)]
        column: usize,
    },
}

/// Loaded and source dimensions, with `-1` where there is nothing to measure.
fn dims_report(table: &[Row], source_rows: usize, source_columns: Option<usize>) -> serde_json::Value {
    let (rows, columns) = data_dimensions(table).map_or((-1, -1), |(r, c)| (r as i64, c as i64));
    json!({
        "rows": rows,
        "columns": columns,
        "source_rows": source_rows,
        "source_columns": source_columns.map_or(-1, |c| c as i64),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = LoadOptions {
        skip_rows: cli.skip_rows,
        skip_columns: cli.skip_columns,
    };
    let loaded = load_csv(&cli.file, &options)
        .with_context(|| format!("loading {}", cli.file.display()))?;
    let mut table = loaded.table;

    let output = match cli.command {
        Command::Dims => dims_report(&table, loaded.total_rows, loaded.total_columns),
        Command::Stats { column: index, header } => {
            let skip = usize::from(header);
            let values = column(&table[skip.min(table.len())..], index);
            let mut summary = serde_json::Map::new();
            let valid = values.iter().filter(|cell| is_valid_number(cell)).count();
            summary.insert("count".into(), json!(valid));
            for aggregate in Aggregate::ALL {
                summary.insert(aggregate.to_string(), json!(aggregate.apply(&values)));
            }
            serde_json::Value::Object(summary)
        }
        Command::Slice {
            column: index,
            pattern,
            export,
            numeric,
        } => {
            let pattern = if numeric && pattern != "*" {
                convert_to_number(&mut table, index);
                let value = NumericPolicy::Loose
                    .coerce(&Cell::from(pattern.as_str()))
                    .with_context(|| format!("pattern {pattern:?} is not a number"))?;
                Pattern::from(value)
            } else {
                Pattern::from(pattern.as_str())
            };
            serde_json::to_value(create_slice(&table, index, &pattern, &export))?
        }
        Command::Convert { column: index } => {
            let converted = convert_to_number(&mut table, index);
            json!({ "converted": converted, "table": table })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_frame::table_from_strs;

    #[test]
    fn dims_of_empty_table_use_minus_one() {
        assert_eq!(
            dims_report(&[], 0, None),
            json!({"rows": -1, "columns": -1, "source_rows": 0, "source_columns": -1})
        );
    }

    #[test]
    fn dims_of_loaded_table() {
        let table = table_from_strs(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(
            dims_report(&table, 3, Some(3)),
            json!({"rows": 2, "columns": 2, "source_rows": 3, "source_columns": 3})
        );
    }
}
