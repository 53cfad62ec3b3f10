/// Scalar comparison happens on the trimmed string form of both sides.
/// Trimming is the only normalization applied; case is preserved.
pub fn normalize_scalar(input: &str) -> &str {
    input.trim()
}

/// Renders a spreadsheet number the way the clinical exports write it:
/// integral floats lose the trailing `.0`, everything else keeps its
/// shortest float form.
pub fn number_to_string(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Empty cells load as null so that blank-vs-blank compares as a match
/// rather than as two empty strings. Whitespace-only content is kept.
pub fn clean_cell(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}
