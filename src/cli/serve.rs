use std::net::SocketAddr;
use std::sync::Arc;

use yansi::Paint;

use firebird::config;
use firebird::handlers::assets::DEFAULT_STYLESHEET;
use firebird::models::AppState;
use firebird::routes::build_router;

use super::{CliError, Context};

pub async fn start_server(
    ctx: Context,
    host: Option<String>,
    port: Option<u16>,
    stylesheet: Option<String>,
) -> Result<(), CliError> {
    let css: Arc<str> = match stylesheet {
        Some(path) => {
            let css = tokio::fs::read_to_string(&path).await.map_err(|e| {
                CliError::Message(format!("Failed to read custom stylesheet at {}: {}", path, e))
            })?;
            tracing::info!("Loaded custom stylesheet from {}", path);
            css.into()
        }
        None => DEFAULT_STYLESHEET.into(),
    };

    let host = host.unwrap_or_else(config::get_host);
    let port = port.unwrap_or_else(config::get_port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| CliError::Message(format!("Invalid host/port format: {}", e)))?;

    tracing::info!(
        %addr,
        api = %ctx.config.api_base_url,
        vm_api = %ctx.config.vm_api_base_url,
        "Starting Firebird console"
    );
    let app = build_router(AppState::new(ctx.client, ctx.config, css));

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        CliError::Message(format!(
            "Failed to bind to {}: {}. Stop the process using this port or pass a different --port.",
            addr, e
        ))
    })?;
    println!("{} {}", "Console running on".green(), format!("http://{}", addr).cyan());
    axum::serve(listener, app)
        .await
        .map_err(|e| CliError::Message(format!("Server error: {}", e)))
}
