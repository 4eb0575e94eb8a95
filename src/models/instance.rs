use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{optional, required, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Compute status such as `ACTIVE`, `SHUTOFF` or `BUILD`; compare
    /// case-insensitively.
    pub status: Option<String>,
    pub flavor: Option<String>,
    pub image: Option<String>,
    pub network_id: Option<String>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub created_at: Option<String>,
}

impl Instance {
    fn status_is(&self, expected: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }

    /// Start is pointless while the instance is already active.
    pub fn can_start(&self) -> bool {
        !self.status_is("active")
    }

    pub fn can_stop(&self) -> bool {
        !self.status_is("shutoff")
    }
}

/// Hardware profile offered when creating an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flavor {
    pub id: &'static str,
    pub vcpus: u32,
    pub ram_mb: u32,
    pub disk_gb: u32,
}

pub const FLAVORS: &[Flavor] = &[
    Flavor { id: "m1.tiny", vcpus: 1, ram_mb: 512, disk_gb: 1 },
    Flavor { id: "m1.small", vcpus: 1, ram_mb: 2048, disk_gb: 20 },
    Flavor { id: "m1.medium", vcpus: 2, ram_mb: 4096, disk_gb: 40 },
    Flavor { id: "m1.large", vcpus: 4, ram_mb: 8192, disk_gb: 80 },
    Flavor { id: "m1.xlarge", vcpus: 8, ram_mb: 16384, disk_gb: 160 },
];

impl Flavor {
    pub fn find(id: &str) -> Option<&'static Flavor> {
        FLAVORS.iter().find(|f| f.id == id)
    }

    /// e.g. `m1.small (1 vCPU, 2048MB RAM, 20GB disk)`
    pub fn label(&self) -> String {
        format!(
            "{} ({} vCPU, {}MB RAM, {}GB disk)",
            self.id, self.vcpus, self.ram_mb, self.disk_gb
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    name: String,
    flavor: String,
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_id: Option<String>,
}

impl CreateInstanceRequest {
    pub fn new(
        name: impl Into<String>,
        flavor: impl Into<String>,
        image: impl Into<String>,
        network_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Name", name)?,
            flavor: required("Flavor", flavor)?,
            image: required("Image", image)?,
            network_id: optional(network_id),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Instance power operations, each mapped to `POST /instances/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    Stop,
    Reboot,
}

impl PowerAction {
    pub fn as_path(&self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Stop => "stop",
            PowerAction::Reboot => "reboot",
        }
    }

    /// Past tense used in confirmation messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            PowerAction::Start => "started",
            PowerAction::Stop => "stopped",
            PowerAction::Reboot => "rebooted",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}
