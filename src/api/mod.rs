// Transport
pub mod client;
pub mod error;

// Endpoint groups
pub mod vms;
pub mod instances;
pub mod networks;
pub mod volumes;
pub mod images;
pub mod identity;
pub mod tenants;
pub mod health;

pub use client::{ApiClient, ApiFamily, ClientConfig};
pub use error::{ApiError, FALLBACK_MESSAGE};
pub use health::HealthProbe;
