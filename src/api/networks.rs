use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{CreateNetworkRequest, Network};
use crate::utils::api_path;

impl ApiClient {
    pub async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        self.get(ApiFamily::Enveloped, "/networks", &[]).await
    }

    pub async fn get_network(&self, id: &str) -> Result<Network, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path("/networks", &[id]), &[])
            .await
    }

    pub async fn create_network(&self, request: &CreateNetworkRequest) -> Result<Option<Network>, ApiError> {
        self.create("/networks", request).await
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path("/networks", &[id]))
            .await
    }
}
