//! Fixed-width cell rendering for latency tables

use std::io::{self, Write};

/// Width of the row label field.
const LABEL_WIDTH: usize = 6;

/// Write `cell` right-aligned into `width` characters.
///
/// Cells longer than the field are written unclipped; the table tolerates
/// the occasional spill rather than losing digits.
fn write_padded(out: &mut dyn Write, width: usize, cell: &str) -> io::Result<()> {
    for _ in cell.len()..width {
        out.write_all(b" ")?;
    }
    out.write_all(cell.as_bytes())
}

/// Write a row label, left-aligned and padded to the label field width.
pub(crate) fn write_label(out: &mut dyn Write, label: &str) -> io::Result<()> {
    out.write_all(label.as_bytes())?;
    for _ in label.len()..LABEL_WIDTH {
        out.write_all(b" ")?;
    }
    Ok(())
}

/// Write one percentage cell.
///
/// `boundary` is the bucket's printed boundary value; its decimal width
/// drives the cell width so data cells line up under the header labels.
/// A zero `total` renders as `---` (nothing was drained this cycle).
pub(crate) fn write_percent(
    out: &mut dyn Write,
    boundary: i64,
    total: f64,
    value: u64,
    decimal_places: usize,
) -> io::Result<()> {
    let cell = if total == 0.0 {
        "---".to_string()
    } else if decimal_places == 0 {
        let percent = if value > 0 {
            (value as f64 * 100.0 / total).round() as i64
        } else {
            0
        };
        format!("{}%", percent)
    } else {
        format!("{:.*}%", decimal_places, value as f64 * 100.0 / total)
    };
    let width = decimal_width(boundary) + 4 + decimal_pad(decimal_places);
    write_padded(out, width, &cell)
}

/// Write a right-aligned `%.1f` cell with a unit suffix; `None` renders
/// as `N/A`.
pub(crate) fn write_float_cell(
    out: &mut dyn Write,
    width: usize,
    value: Option<f64>,
    suffix: &str,
) -> io::Result<()> {
    let cell = match value {
        Some(v) if v >= 0.0 || v.is_nan() => format!("{:.1}{}", v, suffix),
        _ => "N/A".to_string(),
    };
    write_padded(out, width, &cell)
}

/// Write a right-aligned integer cell with a unit suffix.
pub(crate) fn write_int_cell(
    out: &mut dyn Write,
    width: usize,
    value: u64,
    suffix: &str,
) -> io::Result<()> {
    let cell = format!("{}{}", value, suffix);
    write_padded(out, width, &cell)
}

/// Extra cell width when decimal percentages are on.
pub(crate) fn decimal_pad(decimal_places: usize) -> usize {
    if decimal_places > 0 {
        1 + decimal_places
    } else {
        0
    }
}

fn decimal_width(boundary: i64) -> usize {
    boundary.to_string().len()
}
