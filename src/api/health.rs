use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::Envelope;

/// Which liveness probe to hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthProbe {
    Infrastructure,
    Identity,
    Tenants,
}

impl HealthProbe {
    pub const ALL: [HealthProbe; 3] = [
        HealthProbe::Infrastructure,
        HealthProbe::Identity,
        HealthProbe::Tenants,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            HealthProbe::Infrastructure => "/health",
            HealthProbe::Identity => "/identity/health",
            HealthProbe::Tenants => "/tenants/health",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthProbe::Infrastructure => "infrastructure",
            HealthProbe::Identity => "identity",
            HealthProbe::Tenants => "tenants",
        }
    }
}

/// Health probes keep the whole envelope; `data` is whatever the service
/// chose to report.
impl ApiClient {
    pub async fn probe(&self, probe: HealthProbe) -> Result<Envelope<Value>, ApiError> {
        self.get_envelope(probe.path()).await
    }

    pub async fn health(&self) -> Result<Envelope<Value>, ApiError> {
        self.probe(HealthProbe::Infrastructure).await
    }

    pub async fn identity_health(&self) -> Result<Envelope<Value>, ApiError> {
        self.probe(HealthProbe::Identity).await
    }

    pub async fn tenant_health(&self) -> Result<Envelope<Value>, ApiError> {
        self.probe(HealthProbe::Tenants).await
    }
}
