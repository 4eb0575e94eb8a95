use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{
    CreateDomainRequest, CreateUserRequest, Domain, UpdateDomainRequest, UpdateUserRequest, User,
};
use crate::utils::api_path;

const USERS: &str = "/identity/users";
const DOMAINS: &str = "/identity/domains";

/// Users
impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get(ApiFamily::Enveloped, USERS, &[]).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path(USERS, &[id]), &[])
            .await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<Option<User>, ApiError> {
        self.create(USERS, request).await
    }

    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.put(ApiFamily::Enveloped, &api_path(USERS, &[id]), request)
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path(USERS, &[id]))
            .await
    }

    pub async fn enable_user(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/enable", api_path(USERS, &[id]));
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }

    pub async fn disable_user(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/disable", api_path(USERS, &[id]));
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }
}

/// Domains
impl ApiClient {
    pub async fn list_domains(&self) -> Result<Vec<Domain>, ApiError> {
        self.get(ApiFamily::Enveloped, DOMAINS, &[]).await
    }

    pub async fn get_domain(&self, id: &str) -> Result<Domain, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path(DOMAINS, &[id]), &[])
            .await
    }

    pub async fn create_domain(&self, request: &CreateDomainRequest) -> Result<Option<Domain>, ApiError> {
        self.create(DOMAINS, request).await
    }

    pub async fn update_domain(
        &self,
        id: &str,
        request: &UpdateDomainRequest,
    ) -> Result<Domain, ApiError> {
        self.put(ApiFamily::Enveloped, &api_path(DOMAINS, &[id]), request)
            .await
    }

    pub async fn delete_domain(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path(DOMAINS, &[id]))
            .await
    }
}
