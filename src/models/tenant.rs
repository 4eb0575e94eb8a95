use serde::{Deserialize, Serialize};

use super::validation::{optional, required, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub domain_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_id: Option<String>,
    enabled: bool,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Name", name)?,
            description: None,
            domain_id: None,
            enabled: true,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = optional(description);
        self
    }

    pub fn with_domain_id(mut self, domain_id: Option<String>) -> Self {
        self.domain_id = optional(domain_id);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CreateRoleRequest {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Name", name)?,
            description: optional(description),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_defaults_enabled() {
        let req = CreateProjectRequest::new("ops")
            .unwrap()
            .with_description(Some("  ".into()));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"name": "ops", "enabled": true})
        );
    }

    #[test]
    fn test_role_requires_name() {
        assert_eq!(
            CreateRoleRequest::new("", None).unwrap_err(),
            ValidationError::MissingField("Name")
        );
    }
}
