use tracing::trace;

/// Parse one CSV cell as a measurement value.
///
/// - empty cell → `None` (the row does not take part in the maximum)
/// - text that is not a float (header labels, units) → `Some(0.0)`
/// - anything else → the parsed value
///
/// Cells are taken as-is; surrounding whitespace makes a cell non-numeric.
pub fn parse_cell(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            trace!(cell = raw, "non-numeric cell counted as 0");
            Some(0.0)
        }
    }
}
