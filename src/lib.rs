//! Firebird: an administrative console for a virtualization control plane.
//!
//! The library holds the HTTP client for the control-plane API, the fetch
//! lifecycle handles that drive list views, and the server-rendered web
//! console. The `firebird` binary wraps it in a CLI.

pub mod api;
pub mod config;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod templates;
pub mod utils;
