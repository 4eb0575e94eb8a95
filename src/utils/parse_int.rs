/// Parse an optional integer from a form value; blank means absent.
pub fn parse_optional_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            t.parse::<i64>().ok()
        }
    })
}

/// Like [`parse_optional_int`] but keeps unparsable text as an error so forms
/// can tell "left blank" apart from "typed garbage".
pub fn parse_int_field(field: &'static str, value: Option<&str>) -> Result<Option<i64>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("{} must be a whole number", field)),
    }
}
