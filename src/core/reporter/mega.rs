//! MEGA lower-left distance matrix.
//!
//! Distances are `abs(1 - SSIM)`, so identical images are at distance 0 as
//! dendrogram tools expect. Cells without a score are written from the
//! sentinel like any other value and show up as `11`.
//!
//! ```text
//! #mega
//! !Title: SSIM matrix;
//! !Format DataType=Distance DataFormat=LowerLeft NTaxa=3;
//! !Description
//! abs(1-SSIM) between images, as calculated by cmpimg
//! ;
//!
//! [1] #a
//! [2] #b
//! [3] #c
//!
//! [             1        2        3  ]
//! [ 1]
//! [ 2]       0.002
//! [ 3]      0.0877   0.0899
//! ```

use crate::core::files::FileList;
use crate::core::matrix::SsimMatrix;
use std::io::Write;

/// Width of every numeric column
pub const CELL_WIDTH: usize = 9;

/// Significant digits of each distance
pub const PRECISION: usize = 3;

/// Distance written for a similarity score
pub fn distance(score: f64) -> f64 {
    (1.0 - score).abs()
}

/// Write the MEGA document for `files` and `matrix`
pub fn write_mega<W: Write>(files: &FileList, matrix: &SsimMatrix, mut writer: W) -> std::io::Result<()> {
    let names = files.root_names();

    writeln!(writer, "#mega")?;
    writeln!(writer, "!Title: SSIM matrix;")?;
    writeln!(
        writer,
        "!Format DataType=Distance DataFormat=LowerLeft NTaxa={};",
        names.len()
    )?;
    writeln!(writer, "!Description")?;
    writeln!(writer, "abs(1-SSIM) between images, as calculated by cmpimg")?;
    writeln!(writer, ";")?;
    writeln!(writer)?;

    for (index, name) in names.iter().enumerate() {
        writeln!(writer, "[{}] #{}", index + 1, name)?;
    }

    write!(writer, "\n[     ")?;
    for index in 0..names.len() {
        write!(writer, "{:>width$}", index + 1, width = CELL_WIDTH)?;
    }
    writeln!(writer, "  ]")?;

    for row in 0..matrix.size() {
        write!(writer, "[{:>2}]   ", row + 1)?;
        for column in 0..matrix.size() {
            if row > column {
                let cell = format_general(distance(matrix.value(row, column)), PRECISION);
                write!(writer, "{:>width$}", cell, width = CELL_WIDTH)?;
            } else {
                write!(writer, "{:width$}", "", width = CELL_WIDTH)?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// `%g`-style formatting with `precision` significant digits.
///
/// Fixed notation when the decimal exponent is in `-4..precision`, scientific
/// otherwise (`1.5e-05`). Trailing zeros and a trailing point are removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
