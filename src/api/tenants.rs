use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{
    CreateProjectRequest, CreateRoleRequest, Project, Role, UpdateProjectRequest, UpdateRoleRequest,
};
use crate::utils::api_path;

const PROJECTS: &str = "/tenants/projects";
const ROLES: &str = "/tenants/roles";

/// Projects
impl ApiClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get(ApiFamily::Enveloped, PROJECTS, &[]).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path(PROJECTS, &[id]), &[])
            .await
    }

    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Option<Project>, ApiError> {
        self.create(PROJECTS, request).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Project, ApiError> {
        self.put(ApiFamily::Enveloped, &api_path(PROJECTS, &[id]), request)
            .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path(PROJECTS, &[id]))
            .await
    }

    pub async fn enable_project(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/enable", api_path(PROJECTS, &[id]));
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }

    pub async fn disable_project(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/disable", api_path(PROJECTS, &[id]));
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }
}

/// Roles
impl ApiClient {
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get(ApiFamily::Enveloped, ROLES, &[]).await
    }

    pub async fn get_role(&self, id: &str) -> Result<Role, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path(ROLES, &[id]), &[])
            .await
    }

    pub async fn create_role(&self, request: &CreateRoleRequest) -> Result<Option<Role>, ApiError> {
        self.create(ROLES, request).await
    }

    pub async fn update_role(&self, id: &str, request: &UpdateRoleRequest) -> Result<Role, ApiError> {
        self.put(ApiFamily::Enveloped, &api_path(ROLES, &[id]), request)
            .await
    }

    pub async fn delete_role(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path(ROLES, &[id]))
            .await
    }
}
