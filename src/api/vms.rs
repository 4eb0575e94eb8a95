use super::client::{ApiClient, ApiFamily};
use super::error::ApiError;
use crate::models::{Vm, VmCreateRequest, VmListResponse};
use crate::utils::api_path;

/// VM endpoints. These answer with the resource itself, no envelope.
impl ApiClient {
    /// One page of VMs in `namespace`, plus the server's status counts for
    /// the whole namespace.
    pub async fn list_vms(
        &self,
        namespace: &str,
        page: u32,
        page_size: u32,
    ) -> Result<VmListResponse, ApiError> {
        let query = [("page", page.to_string()), ("pageSize", page_size.to_string())];
        self.get(ApiFamily::Bare, &api_path("/vms", &[namespace]), &query)
            .await
    }

    pub async fn get_vm(&self, namespace: &str, name: &str) -> Result<Vm, ApiError> {
        self.get(ApiFamily::Bare, &api_path("/vms", &[namespace, name]), &[])
            .await
    }

    pub async fn create_vm(&self, request: &VmCreateRequest) -> Result<Vm, ApiError> {
        self.post(ApiFamily::Bare, "/vms", request).await
    }

    pub async fn delete_vm(&self, namespace: &str, name: &str) -> Result<(), ApiError> {
        self.delete(ApiFamily::Bare, &api_path("/vms", &[namespace, name]))
            .await
    }
}
