use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{CreateImageRequest, Image};
use crate::utils::api_path;

impl ApiClient {
    pub async fn list_images(&self) -> Result<Vec<Image>, ApiError> {
        self.get(ApiFamily::Enveloped, "/images", &[]).await
    }

    pub async fn get_image(&self, id: &str) -> Result<Image, ApiError> {
        self.get(ApiFamily::Enveloped, &api_path("/images", &[id]), &[])
            .await
    }

    pub async fn create_image(&self, request: &CreateImageRequest) -> Result<Option<Image>, ApiError> {
        self.create("/images", request).await
    }

    pub async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Enveloped, &api_path("/images", &[id]))
            .await
    }
}
