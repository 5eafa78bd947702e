//! Parsers for `getprop` and `wm` output.

use std::collections::HashMap;

use crate::error::AndroidError;

/// Parse `getprop` output (`[ro.product.model]: [Pixel 7]` per line).
///
/// Lines that do not follow the format are skipped.
#[must_use]
pub fn parse_getprop(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim().strip_prefix('[')?.split_once("]: [")?;
            Some((key.to_string(), value.strip_suffix(']')?.to_string()))
        })
        .collect()
}

/// Parse `wm size` output into `(width, height)`.
///
/// An override size, when present, wins over the physical size.
///
/// # Errors
///
/// Returns [`AndroidError::UnexpectedOutput`] when no size line is found.
pub fn parse_wm_size(output: &str) -> Result<(u32, u32), AndroidError> {
    last_value(output, "size")
        .and_then(|value| {
            let (width, height) = value.split_once('x')?;
            Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
        })
        .ok_or_else(|| AndroidError::UnexpectedOutput {
            command: "wm size",
            output: output.trim().to_string(),
        })
}

/// Parse `wm density` output into the dpi value.
///
/// # Errors
///
/// Returns [`AndroidError::UnexpectedOutput`] when no density line is found.
pub fn parse_wm_density(output: &str) -> Result<f64, AndroidError> {
    last_value(output, "density")
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| AndroidError::UnexpectedOutput {
            command: "wm density",
            output: output.trim().to_string(),
        })
}

/// Value of the last `<Kind> <label>: <value>` line; `Override` lines come
/// after `Physical` ones.
fn last_value<'a>(output: &'a str, label: &str) -> Option<&'a str> {
    output
        .lines()
        .rev()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim_end().ends_with(label))
        .map(|(_, value)| value.trim())
}
