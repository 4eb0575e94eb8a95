use serde::{Deserialize, Serialize};

use super::validation::{optional, required, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
    pub admin_state_up: Option<bool>,
    pub shared: Option<bool>,
    pub tenant_id: Option<String>,
    /// Subnet ids; only the count is displayed.
    pub subnets: Option<Vec<String>>,
    pub created_at: Option<String>,
}

impl Network {
    pub fn subnet_summary(&self) -> String {
        match self.subnets.as_deref() {
            None | Some([]) => "None".to_string(),
            Some(subnets) => format!("{} subnet(s)", subnets.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkRequest {
    name: String,
    admin_state_up: bool,
    shared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant_id: Option<String>,
}

impl CreateNetworkRequest {
    /// New request with the admin state up and sharing disabled.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Name", name)?,
            admin_state_up: true,
            shared: false,
            tenant_id: None,
        })
    }

    pub fn with_admin_state_up(mut self, up: bool) -> Self {
        self.admin_state_up = up;
        self
    }

    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: Option<String>) -> Self {
        self.tenant_id = optional(tenant_id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
