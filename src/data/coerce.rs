use super::model::{Cell, Row};
use super::numeric::NumericPolicy;

/// Convert numeric-looking text in column `col` to numbers, in place.
///
/// Row 0 is a header and is never touched. Cells already holding numbers
/// are left alone, so a second pass over the same column converts nothing.
/// Uses the loose recogniser: `"+5"` becomes `5`, and even `""` passes and
/// becomes `NaN`. Returns the number of cells converted.
pub fn convert_to_number(table: &mut [Row], col: usize) -> usize {
    let mut converted = 0;
    for row in table.iter_mut().skip(1) {
        let Some(cell) = row.get_mut(col) else {
            continue;
        };
        if !cell.is_text() {
            continue;
        }
        if let Some(value) = NumericPolicy::Loose.coerce(cell) {
            *cell = Cell::Number(value);
            converted += 1;
        }
    }
    log::debug!("convert_to_number: {converted} cell(s) converted in column {col}");
    converted
}
