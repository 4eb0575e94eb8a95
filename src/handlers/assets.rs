use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::models::AppState;

/// Stylesheet compiled into the binary; `serve --stylesheet` swaps it out.
pub const DEFAULT_STYLESHEET: &str = include_str!("../../static/styles.css");

pub async fn stylesheet_get(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], state.stylesheet.to_string())
}
