use firebird::config::{self, ConfigError, ConsoleConfig};
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

// Tests in this file mutate process-wide environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const VARS: &[&str] = &[
    "API_BASE_URL",
    "VM_API_BASE_URL",
    "REQUEST_TIMEOUT_SECS",
    "DEFAULT_NAMESPACE",
    "DEFAULT_PAGE_SIZE",
    "HOST",
    "PORT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://control-plane:8080/api/v1/", "x"),
        "http://control-plane:8080/api/v1"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://control-plane:8080///", "x"),
        "http://control-plane:8080"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://control-plane:8080/  ", "x"),
        "http://control-plane:8080"
    );
}

#[test]
fn test_sanitize_base_url_blank_uses_default() {
    assert_eq!(config::sanitize_base_url("   ", "http://fallback"), "http://fallback");
    assert_eq!(config::sanitize_base_url("", "http://fallback"), "http://fallback");
}

#[test]
fn test_defaults_when_environment_is_empty() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    clear_env();

    let cfg = ConsoleConfig::from_env().unwrap();
    assert_eq!(cfg, ConsoleConfig::default());
    assert_eq!(cfg.api_base_url, "http://localhost:8080/api/v1");
    assert_eq!(cfg.vm_api_base_url, "http://localhost:8080");
    assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    assert_eq!(cfg.default_namespace, "default");
    assert_eq!(cfg.default_page_size, 20);
    assert_eq!(config::get_host(), "127.0.0.1");
    assert_eq!(config::get_port(), 3000);
}

#[test]
fn test_environment_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    clear_env();
    env::set_var("API_BASE_URL", "https://infra.example.com/api/v1/");
    env::set_var("VM_API_BASE_URL", " https://vms.example.com ");
    env::set_var("REQUEST_TIMEOUT_SECS", "30");
    env::set_var("DEFAULT_NAMESPACE", "narek");
    env::set_var("DEFAULT_PAGE_SIZE", "50");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("PORT", "8081");

    let cfg = ConsoleConfig::from_env().unwrap();
    assert_eq!(cfg.api_base_url, "https://infra.example.com/api/v1");
    assert_eq!(cfg.vm_api_base_url, "https://vms.example.com");
    assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    assert_eq!(cfg.default_namespace, "narek");
    assert_eq!(cfg.default_page_size, 50);
    assert_eq!(config::get_host(), "0.0.0.0");
    assert_eq!(config::get_port(), 8081);

    clear_env();
}

#[test]
fn test_page_size_is_clamped() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    clear_env();
    env::set_var("DEFAULT_PAGE_SIZE", "5000");
    assert_eq!(config::get_default_page_size().unwrap(), config::MAX_PAGE_SIZE);
    clear_env();

    assert_eq!(config::clamp_page_size(0), 1);
    assert_eq!(config::clamp_page_size(25), 25);
}

#[test]
fn test_invalid_numbers_are_reported() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    clear_env();
    env::set_var("REQUEST_TIMEOUT_SECS", "soon");
    assert_eq!(
        ConsoleConfig::from_env().unwrap_err(),
        ConfigError::InvalidNumber {
            name: "REQUEST_TIMEOUT_SECS",
            value: "soon".to_string()
        }
    );

    env::set_var("REQUEST_TIMEOUT_SECS", "0");
    assert!(config::get_request_timeout().is_err());
    clear_env();
}

#[test]
fn test_blank_namespace_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    clear_env();
    env::set_var("DEFAULT_NAMESPACE", "   ");
    assert_eq!(config::get_default_namespace(), "default");
    env::set_var("PORT", "not-a-port");
    assert_eq!(config::get_port(), 3000);
    clear_env();
}
