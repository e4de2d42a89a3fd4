// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Simple, auxiliary functions and constants used through the `breather_rs` library.

/******************************/
/*         CONSTANTS          */
/******************************/

/// Largest number of decimal places supported by the exporter.
pub(crate) const MAX_PRECISION: u32 = 12;

/// Largest magnitude of a quantized value. Integers up to 2^53 are exactly representable by `f64`.
pub(crate) const MAX_QUANTIZED: f64 = 9_007_199_254_740_992.0;

/******************************/
/*         GROUP NAMES        */
/******************************/

/// Check whether the name for the group is a valid group name.
/// Characters '"&|!@()<>= are not allowed. Names containing whitespace only are also not allowed.
pub(crate) fn name_is_valid(string: &str) -> bool {
    if string.trim().is_empty() {
        return false;
    }

    let forbidden_chars = "'\"&|!@()<>=";

    for c in string.chars() {
        if forbidden_chars.contains(c) {
            return false;
        }
    }

    true
}

/// Check whether the string can be used as a LAMMPS group id.
/// LAMMPS only accepts alphanumeric characters and underscores.
pub(crate) fn lammps_id_is_valid(string: &str) -> bool {
    !string.is_empty() && string.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/******************************/
/*       NUMBER FORMATTING    */
/******************************/

/// Quantize `value` to an integer multiple of `10^-precision`.
/// Returns `None` if the value is not finite or its quantized magnitude exceeds 2^53.
#[inline]
pub(crate) fn quantize(value: f64, precision: u32) -> Option<i64> {
    let scaled = (value * 10f64.powi(precision as i32)).round();
    if scaled.is_finite() && scaled.abs() <= MAX_QUANTIZED {
        Some(scaled as i64)
    } else {
        None
    }
}

/// Format a quantized value with `precision` decimal places.
/// Negative zero is never produced.
pub(crate) fn format_quantized(key: i64, precision: u32) -> String {
    let value = key as f64 / 10f64.powi(precision as i32);
    let string = format!("{:.*}", precision as usize, value);

    if key == 0 {
        string.trim_start_matches('-').to_owned()
    } else {
        string
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
