use crate::models::VmStatus;

/// Title-case a status word for display: `SHUTOFF` -> `Shutoff`,
/// `in-use` -> `In Use`.
pub fn format_status(status: &str) -> String {
    let status = status.trim();
    if status.is_empty() {
        return "Unknown".to_string();
    }
    status
        .split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Badge colour for a VM status chip.
pub fn vm_status_class(status: VmStatus) -> &'static str {
    match status {
        VmStatus::Running => "badge badge-success",
        VmStatus::Pending => "badge badge-warning",
        VmStatus::Error => "badge badge-error",
        _ => "badge badge-default",
    }
}

/// Badge colour for the free-form statuses of the infrastructure resources.
pub fn resource_status_class(status: &str) -> &'static str {
    match status.trim().to_lowercase().as_str() {
        "active" | "available" | "in-use" | "running" | "up" => "badge badge-success",
        "build" | "building" | "creating" | "queued" | "saving" | "attaching"
        | "detaching" | "pending" => "badge badge-warning",
        "error" | "killed" | "deleted" | "down" => "badge badge-error",
        _ => "badge badge-default",
    }
}

/// Badge for the enabled flag of users and projects.
pub fn enabled_label(enabled: Option<bool>) -> (&'static str, &'static str) {
    if enabled.unwrap_or(false) {
        ("Enabled", "badge badge-success")
    } else {
        ("Disabled", "badge badge-default")
    }
}
