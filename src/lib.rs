//! Minimal in-memory tabular data toolkit.
//!
//! A [`Table`] is loaded from comma-separated text, numeric-looking cells
//! are recognised (strictly for statistics, loosely for in-place coercion)
//! and the table can be summarised or sliced:
//!
//! ```
//! use rusty_frame::{create_slice, data_dimensions, find_total, table_from_strs, Pattern};
//!
//! let table = table_from_strs(&[&["name", "qty"], &["a", "1"], &["b", "2"], &["a", "4"]]);
//! let rows = create_slice(&table, 0, &Pattern::from("a"), &[1]);
//! let qty: Vec<_> = rows.into_iter().flatten().collect();
//! assert_eq!(find_total(&qty), 5.0);
//! assert_eq!(data_dimensions(&table), Some((4, 2)));
//! ```
//!
//! Every operation is total: bad shapes give empty results or `0`, never an
//! error. [`compat`] exposes the same operations over untyped JSON values
//! with `-1` / `0` / `[]` sentinels.

pub mod compat;
pub mod data;
pub mod error;

pub use data::coerce::convert_to_number;
pub use data::loader::{file_exists, load_csv, LoadOptions, LoadedTable};
pub use data::model::{table_from_strs, Cell, Pattern, Row, Table};
pub use data::numeric::{is_valid_number, NumericPolicy};
pub use data::shape::{column, data_dimensions, flatten};
pub use data::slice::create_slice;
pub use data::stats::{calculate_mean, calculate_median, find_total, Aggregate};
pub use error::FrameError;
