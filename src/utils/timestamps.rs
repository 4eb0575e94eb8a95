use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Parse a server timestamp. The control plane emits naive timestamps
/// (`2024-01-01T00:00:00`) that are UTC; anything carrying an offset is
/// honoured as given.
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&format!("{}Z", raw)) {
        return Some(dt.with_timezone(&Utc));
    }
    // Space-separated or fraction-less variants.
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Age rendered as the largest non-zero unit: `3d`, `5h`, `12m` or `now`.
/// Timestamps in the future also read as `now`.
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();
    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "now".to_string()
    }
}

/// Age of a raw server timestamp relative to the current time, or `-` when
/// the value is missing or unparsable.
pub fn age_since(raw: &str) -> String {
    match parse_server_timestamp(raw) {
        Some(created) => format_age(created, Utc::now()),
        None => "-".to_string(),
    }
}

/// Server timestamp shown in the viewer's local time zone.
pub fn format_local(raw: &str) -> String {
    match parse_server_timestamp(raw) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => {
            if raw.trim().is_empty() {
                "-".to_string()
            } else {
                raw.to_string()
            }
        }
    }
}
