use std::env;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_VM_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Everything the console and CLI read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL of the enveloped infrastructure/identity/tenant API.
    pub api_base_url: String,
    /// Base URL of the VM API (bare responses).
    pub vm_api_base_url: String,
    pub request_timeout: Duration,
    pub default_namespace: String,
    pub default_page_size: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            vm_api_base_url: DEFAULT_VM_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: get_api_base_url(),
            vm_api_base_url: get_vm_api_base_url(),
            request_timeout: get_request_timeout()?,
            default_namespace: get_default_namespace(),
            default_page_size: get_default_page_size()?,
        })
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(
        &env::var("API_BASE_URL").unwrap_or_default(),
        DEFAULT_API_BASE_URL,
    )
}

pub fn get_vm_api_base_url() -> String {
    sanitize_base_url(
        &env::var("VM_API_BASE_URL").unwrap_or_default(),
        DEFAULT_VM_API_BASE_URL,
    )
}

pub fn get_default_namespace() -> String {
    env::var("DEFAULT_NAMESPACE")
        .ok()
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

pub fn get_request_timeout() -> Result<Duration, ConfigError> {
    let secs = parse_positive("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    Ok(Duration::from_secs(secs))
}

pub fn get_default_page_size() -> Result<u32, ConfigError> {
    let size = parse_positive("DEFAULT_PAGE_SIZE", u64::from(DEFAULT_PAGE_SIZE))?;
    Ok(clamp_page_size(size.min(u64::from(u32::MAX)) as u32))
}

/// Keep page sizes within what the VM API accepts.
pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

fn parse_positive(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(default),
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}

/// Trim whitespace and trailing slashes; fall back to `default` when empty.
pub fn sanitize_base_url(raw: &str, default: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn get_host() -> String {
    env::var("HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
