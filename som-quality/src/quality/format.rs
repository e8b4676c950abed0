#[cfg(test)]
#[path = "../../tests/unit/quality/format_test.rs"]
mod format_test;

use super::*;
use crate::utils::GenericResult;
use std::io::Write;

/// Writes unit level values as a grid: one line per row (`y`), values of a row separated by a
/// single space.
pub fn write_unit_qualities<W: Write>(writer: &mut W, qualities: &UnitQualities) -> GenericResult<()> {
    for y in 0..qualities.y_size() {
        let line = (0..qualities.x_size()).map(|x| qualities.get(x, y).to_string()).collect::<Vec<_>>().join(" ");
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes topographic function values as `<offset>: <value>` lines for offsets from `-K` to `K`.
pub fn write_topographic_function<W: Write>(writer: &mut W, values: &TopographicFunctionValues) -> GenericResult<()> {
    for (offset, value) in values.iter() {
        writeln!(writer, "{offset}: {value}")?;
    }

    writer.flush()?;

    Ok(())
}
