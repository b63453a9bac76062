//! CSV similarity table.
//!
//! ```text
//! structures,a,b,c
//! a,,,
//! b,0.998132,,
//! c,0.912345,0.910022,
//! ```
//!
//! Raw SSIM values, lower triangle only; cells on and above the diagonal
//! are empty fields.

use crate::core::files::FileList;
use crate::core::matrix::SsimMatrix;
use std::io::Write;

/// Label of the header's first field
pub const CORNER_LABEL: &str = "structures";

/// Write the CSV table for `files` and `matrix`
pub fn write_csv<W: Write>(files: &FileList, matrix: &SsimMatrix, mut writer: W) -> std::io::Result<()> {
    let names = files.root_names();

    write!(writer, "{}", CORNER_LABEL)?;
    for name in &names {
        write!(writer, ",{}", name)?;
    }
    writeln!(writer)?;

    for (row, name) in names.iter().enumerate() {
        write!(writer, "{}", name)?;
        for column in 0..matrix.size() {
            if row > column {
                write!(writer, ",{}", format_fixed(matrix.value(row, column)))?;
            } else {
                write!(writer, ",")?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Six-decimal fixed notation
fn format_fixed(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.6}", value)
    }
}
