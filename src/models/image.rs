use serde::{Deserialize, Serialize};

use super::validation::{in_range, one_of, required, ValidationError};

pub const DISK_FORMATS: &[&str] = &["raw", "qcow2", "vhd", "vmdk", "vdi", "iso", "aki", "ari", "ami"];
pub const CONTAINER_FORMATS: &[&str] = &["bare", "ovf", "ova", "aki", "ari", "ami"];
pub const VISIBILITIES: &[&str] = &["public", "private", "shared"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
    pub visibility: Option<String>,
    pub disk_format: Option<String>,
    pub container_format: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// GB.
    pub min_disk: Option<u64>,
    /// MB.
    pub min_ram: Option<u64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    name: String,
    disk_format: String,
    container_format: String,
    visibility: String,
    min_disk: u64,
    min_ram: u64,
}

impl CreateImageRequest {
    /// Private visibility, no minimum disk or RAM.
    pub fn new(
        name: impl Into<String>,
        disk_format: &str,
        container_format: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Name", name)?,
            disk_format: one_of("disk format", disk_format, DISK_FORMATS)?,
            container_format: one_of("container format", container_format, CONTAINER_FORMATS)?,
            visibility: "private".to_string(),
            min_disk: 0,
            min_ram: 0,
        })
    }

    pub fn with_visibility(mut self, visibility: &str) -> Result<Self, ValidationError> {
        self.visibility = one_of("visibility", visibility, VISIBILITIES)?;
        Ok(self)
    }

    pub fn with_minimums(mut self, min_disk_gb: i64, min_ram_mb: i64) -> Result<Self, ValidationError> {
        self.min_disk = in_range("Min disk (GB)", min_disk_gb, 0, 65_536)? as u64;
        self.min_ram = in_range("Min RAM (MB)", min_ram_mb, 0, 4_194_304)? as u64;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
