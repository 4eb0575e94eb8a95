use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::fetch::FetchState;
use crate::models::{AppState, Flash, FormView, TableView};
use crate::templates::{BaseTemplate, ResourcePageTemplate};

pub const FLASH_COOKIE: &str = "firebird_flash";

#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub flash: Option<Flash>,
}

/// Queue a banner for the next rendered page.
pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    let value = match serde_json::to_string(flash) {
        Ok(json) => urlencoding::encode(&json).into_owned(),
        Err(e) => {
            tracing::error!(%e, "Failed to encode flash message");
            return jar;
        }
    };
    let cookie = Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::minutes(5));
    jar.add(cookie)
}

/// Pop the pending banner, if any. The cookie is removed so the banner
/// shows exactly once.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = urlencoding::decode(cookie.value())
        .ok()
        .and_then(|json| serde_json::from_str::<Flash>(&json).ok());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}

pub fn build_template_globals(state: &AppState, jar: CookieJar) -> (CookieJar, TemplateGlobals) {
    let (jar, flash) = take_flash(jar);
    let globals = TemplateGlobals {
        api_hostname: crate::utils::hostname_from_url(&state.config.api_base_url),
        flash,
    };
    (jar, globals)
}

/// A pending banner wins over a load error so the outcome of the action the
/// user just took is never hidden.
pub fn merge_flash(pending: Option<Flash>, load_error: Option<Flash>) -> Option<Flash> {
    pending.or(load_error)
}

pub fn render_template<T>(jar: CookieJar, t: T) -> Response
where
    T: askama::Template + BaseTemplate,
{
    tracing::debug!(page = t.active_nav(), flash = t.flash().is_some(), "Rendering page");
    match t.render() {
        Ok(body) => (jar, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn redirect_with_flash(jar: CookieJar, to: &str, flash: Flash) -> Response {
    if flash.is_error() {
        tracing::warn!(message = %flash.message, "Action failed");
    } else {
        tracing::info!(message = %flash.message, "Action succeeded");
    }
    (set_flash(jar, &flash), Redirect::to(to)).into_response()
}

/// Body of the per-row action buttons. `name` only feeds the flash message.
#[derive(Deserialize, Debug, Default)]
pub struct RowActionForm {
    pub name: Option<String>,
}

/// Render a list page. A failed load shows as an error banner above an
/// empty table.
pub fn render_resource_page<T>(
    state: &AppState,
    jar: CookieJar,
    active_nav: &'static str,
    title: &'static str,
    fetched: &FetchState<T>,
    table: TableView,
    form: Option<FormView>,
) -> Response {
    let load_error = fetched
        .error()
        .map(|e| Flash::error(format!("Failed to fetch {}: {}", title.to_lowercase(), e)));
    let (jar, TemplateGlobals { api_hostname, flash }) = build_template_globals(state, jar);
    render_template(
        jar,
        ResourcePageTemplate {
            api_hostname,
            flash: merge_flash(flash, load_error),
            active_nav,
            title,
            table,
            form,
        },
    )
}

/// Trimmed form value; blank becomes `None`.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Display name for flash messages when a form did not send one.
pub fn display_name(name: &Option<String>, id: &str) -> String {
    non_empty(name).unwrap_or_else(|| id.to_string())
}
