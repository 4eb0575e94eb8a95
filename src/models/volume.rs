use serde::{Deserialize, Serialize};

use super::validation::{in_range, one_of, required, ValidationError};

pub const VOLUME_TYPES: &[&str] = &["lvmdriver-1", "ceph", "nfs", "iscsi"];
pub const AVAILABILITY_ZONES: &[&str] = &["nova", "compute", "storage"];
pub const DEFAULT_VOLUME_TYPE: &str = "lvmdriver-1";
pub const DEFAULT_AVAILABILITY_ZONE: &str = "nova";
pub const DEFAULT_ATTACH_DEVICE: &str = "/dev/vdb";
pub const MAX_VOLUME_SIZE_GB: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeAttachment {
    pub instance_id: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
    /// Size in GB.
    pub size: Option<u64>,
    pub volume_type: Option<String>,
    pub availability_zone: Option<String>,
    pub attachments: Option<Vec<VolumeAttachment>>,
    pub created_at: Option<String>,
}

impl Volume {
    pub fn is_attached(&self) -> bool {
        self.attachments.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn attachment_summary(&self) -> String {
        match self.attachments.as_deref() {
            None | Some([]) => "None".to_string(),
            Some(a) => format!("{} instance(s)", a.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolumeRequest {
    name: String,
    size: u64,
    volume_type: String,
    availability_zone: String,
}

impl CreateVolumeRequest {
    pub fn new(name: impl Into<String>, size_gb: i64) -> Result<Self, ValidationError> {
        let size = in_range("Size (GB)", size_gb, 1, MAX_VOLUME_SIZE_GB)?;
        Ok(Self {
            name: required("Name", name)?,
            size: size as u64,
            volume_type: DEFAULT_VOLUME_TYPE.to_string(),
            availability_zone: DEFAULT_AVAILABILITY_ZONE.to_string(),
        })
    }

    pub fn with_volume_type(mut self, volume_type: &str) -> Result<Self, ValidationError> {
        self.volume_type = one_of("volume type", volume_type, VOLUME_TYPES)?;
        Ok(self)
    }

    pub fn with_availability_zone(mut self, zone: &str) -> Result<Self, ValidationError> {
        self.availability_zone = one_of("availability zone", zone, AVAILABILITY_ZONES)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /volumes/{id}/attach`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachVolumeRequest {
    instance_id: String,
    device: String,
}

impl AttachVolumeRequest {
    pub fn new(instance_id: impl Into<String>, device: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            instance_id: required("Instance", instance_id)?,
            device: required("Device", device)?,
        })
    }
}
