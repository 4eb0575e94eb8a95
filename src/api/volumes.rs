use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{AttachVolumeRequest, CreateVolumeRequest, Volume};
use crate::utils::api_path;

impl ApiClient {
    pub async fn list_volumes(&self) -> Result<Vec<Volume>, ApiError> {
        self.get(ApiFamily::Enveloped, "/volumes", &[]).await
    }

    pub async fn get_volume(&self, id: &str) -> Result<Volume, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path("/volumes", &[id]), &[])
            .await
    }

    pub async fn create_volume(&self, request: &CreateVolumeRequest) -> Result<Option<Volume>, ApiError> {
        self.create("/volumes", request).await
    }

    pub async fn delete_volume(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path("/volumes", &[id]))
            .await
    }

    /// Body: `{instanceId, device}`.
    pub async fn attach_volume(&self, id: &str, request: &AttachVolumeRequest) -> Result<(), ApiError> {
        let path = format!("{}/attach", api_path("/volumes", &[id]));
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.post_empty(ApiFamily::Enveloped, &path, Some(&body)).await
    }

    /// Detach is a bodiless POST, not a DELETE.
    pub async fn detach_volume(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/detach", api_path("/volumes", &[id]));
        self.post_empty(ApiFamily::Enveloped, &path, None).await
    }
}
