use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{in_range, optional, password_pair, required, ValidationError};

/// vCPU choices offered by the create form.
pub const CPU_OPTIONS: &[u32] = &[1, 2, 4, 8, 16, 32];
/// Memory choices (GB) offered by the create form.
pub const MEMORY_OPTIONS: &[u32] = &[1, 2, 4, 8, 16, 32, 64, 128];
pub const DEFAULT_VM_IMAGE: &str = "kubevirt/cirros-container-disk-demo:latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VmStatus {
    Running,
    Stopped,
    Pending,
    Error,
    Terminated,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VmStatus::Running => "Running",
            VmStatus::Stopped => "Stopped",
            VmStatus::Pending => "Pending",
            VmStatus::Error => "Error",
            VmStatus::Terminated => "Terminated",
            VmStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VmPhase {
    Running,
    Scheduling,
    Scheduled,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for VmPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VmPhase::Running => "Running",
            VmPhase::Scheduling => "Scheduling",
            VmPhase::Scheduled => "Scheduled",
            VmPhase::Failed => "Failed",
            VmPhase::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

fn unknown_status() -> VmStatus {
    VmStatus::Unknown
}

fn unknown_phase() -> VmPhase {
    VmPhase::Unknown
}

/// A virtual machine as returned by the VM endpoints. VMs are addressed by
/// `namespace` + `name`; there is no separate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    pub name: String,
    pub namespace: String,
    #[serde(default = "unknown_status")]
    pub status: VmStatus,
    #[serde(default = "unknown_phase")]
    pub phase: VmPhase,
    #[serde(default)]
    pub cpu_cores: u32,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    /// Naive UTC timestamp, see [`crate::utils::parse_server_timestamp`].
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub labels: Option<HashMap<String, String>>,
    pub annotations: Option<HashMap<String, String>>,
    pub ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    pub node_name: Option<String>,
    pub cpu_usage: Option<String>,
    pub memory_usage: Option<String>,
}

/// One page of VMs plus collection-wide status counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmListResponse {
    #[serde(default)]
    pub vms: Vec<Vm>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(default)]
    pub running_count: u64,
    #[serde(default)]
    pub stopped_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub pending_count: u64,
}

/// Body of `POST /vms`.
///
/// Built through [`VmCreateRequest::new`] so that required fields and
/// numeric ranges are checked before the request leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VmCreateRequest {
    name: String,
    namespace: String,
    cpu_cores: u32,
    memory_gb: u32,
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_public_ip: Option<bool>,
}

impl VmCreateRequest {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        cpu_cores: u32,
        memory_gb: u32,
        image: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = required("Name", name)?;
        let namespace = required("Namespace", namespace)?;
        let image = required("Image", image)?;
        in_range("CPU cores", i64::from(cpu_cores), 1, 32)?;
        in_range("Memory (GB)", i64::from(memory_gb), 1, 128)?;
        Ok(Self {
            name,
            namespace,
            cpu_cores,
            memory_gb,
            image,
            description: None,
            labels: None,
            password: None,
            enable_public_ip: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = optional(description);
        self
    }

    /// Comma separated `key=value` pairs, passed through to the server.
    pub fn with_labels(mut self, labels: Option<String>) -> Self {
        self.labels = optional(labels);
        self
    }

    /// Set a console password. An empty password leaves it unset; anything
    /// else must match `confirm` and meet the minimum length.
    pub fn with_password(mut self, password: &str, confirm: &str) -> Result<Self, ValidationError> {
        if password.is_empty() && confirm.is_empty() {
            self.password = None;
            return Ok(self);
        }
        self.password = Some(password_pair(password, confirm)?);
        Ok(self)
    }

    pub fn with_public_ip(mut self, enable: bool) -> Self {
        self.enable_public_ip = Some(enable);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_serializes_camel_case() {
        let req = VmCreateRequest::new("vm1", "narek", 2, 4, "cirros:latest").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"name": "vm1", "namespace": "narek", "cpuCores": 2, "memoryGb": 4, "image": "cirros:latest"})
        );
    }

    #[test]
    fn test_create_request_rejects_missing_name() {
        let err = VmCreateRequest::new(" ", "narek", 2, 4, "cirros").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Name"));
    }

    #[test]
    fn test_create_request_rejects_zero_cpu() {
        assert!(VmCreateRequest::new("vm1", "narek", 0, 4, "cirros").is_err());
    }

    #[test]
    fn test_password_is_optional_but_checked() {
        let req = VmCreateRequest::new("vm1", "narek", 2, 4, "cirros").unwrap();
        let unset = req.clone().with_password("", "").unwrap();
        assert!(serde_json::to_value(&unset).unwrap().get("password").is_none());
        assert_eq!(
            req.clone().with_password("abc", "abc").unwrap_err(),
            ValidationError::PasswordTooShort
        );
        assert_eq!(
            req.with_password("abcdefg", "abcdefx").unwrap_err(),
            ValidationError::PasswordMismatch
        );
    }

    #[test]
    fn test_vm_tolerates_unknown_status_and_missing_fields() {
        let vm: Vm = serde_json::from_value(json!({
            "name": "vm1",
            "namespace": "narek",
            "status": "Migrating",
            "cpuCores": 2,
            "memory": "4Gi",
            "image": "cirros",
            "createdAt": "2024-01-01T00:00:00",
            "updatedAt": "2024-01-01T00:00:00"
        }))
        .unwrap();
        assert_eq!(vm.status, VmStatus::Unknown);
        assert_eq!(vm.phase, VmPhase::Unknown);
        assert!(vm.ip_address.is_none());
    }
}
