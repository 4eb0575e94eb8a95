/// Percent-encode one caller-supplied path segment (namespace, name, id).
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Join already-trusted literals and encoded segments into a request path:
/// `api_path("/vms", &[ns, name])` -> `/vms/<ns>/<name>`.
pub fn api_path(literal: &str, segments: &[&str]) -> String {
    let mut out = String::from(literal);
    for seg in segments {
        out.push('/');
        out.push_str(&encode_segment(seg));
    }
    out
}
