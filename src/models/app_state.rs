use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ConsoleConfig;

/// Shared state handed to every console handler. Built once at startup and
/// never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub config: Arc<ConsoleConfig>,
    /// Stylesheet served at `/static/styles.css`; the embedded default unless
    /// `serve --stylesheet` supplied one.
    pub stylesheet: Arc<str>,
}

impl AppState {
    pub fn new(client: ApiClient, config: ConsoleConfig, stylesheet: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            config: Arc::new(config),
            stylesheet: stylesheet.into(),
        }
    }

    pub fn default_namespace(&self) -> &str {
        &self.config.default_namespace
    }

    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }
}
