use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{CreateInstanceRequest, Instance, PowerAction};
use crate::utils::api_path;

impl ApiClient {
    pub async fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.get(ApiFamily::Enveloped, "/instances", &[]).await
    }

    pub async fn get_instance(&self, id: &str) -> Result<Instance, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path("/instances", &[id]), &[])
            .await
    }

    pub async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> Result<Option<Instance>, ApiError> {
        self.create("/instances", request).await
    }

    pub async fn delete_instance(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path("/instances", &[id]))
            .await
    }

    /// POST `/instances/{id}/{start|stop|reboot}`.
    pub async fn power_action(&self, id: &str, action: PowerAction) -> Result<(), ApiError> {
        let path = format!("{}/{}", api_path("/instances", &[id]), action.as_path());
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }

    pub async fn start_instance(&self, id: &str) -> Result<(), ApiError> {
        self.power_action(id, PowerAction::Start).await
    }

    pub async fn stop_instance(&self, id: &str) -> Result<(), ApiError> {
        self.power_action(id, PowerAction::Stop).await
    }

    pub async fn reboot_instance(&self, id: &str) -> Result<(), ApiError> {
        self.power_action(id, PowerAction::Reboot).await
    }
}
