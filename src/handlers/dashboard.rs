use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::fetch::{FetchHandle, FetchState};
use crate::models::{AppState, CardView};
use crate::templates::DashboardTemplate;

use super::helpers::{build_template_globals, render_template, TemplateGlobals};

pub async fn root_get() -> impl IntoResponse {
    Redirect::to("/compute")
}

fn card<T>(label: &'static str, href: &'static str, state: &FetchState<Vec<T>>) -> CardView {
    CardView {
        label,
        href,
        count: state.data().map(Vec::len),
        error: state.error().map(str::to_string),
    }
}

/// Six independent counts fetched concurrently; one failing card does not
/// affect the others.
pub async fn dashboard_get(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let instances = FetchHandle::new();
    let volumes = FetchHandle::new();
    let networks = FetchHandle::new();
    let images = FetchHandle::new();
    let users = FetchHandle::new();
    let projects = FetchHandle::new();

    let client = &state.client;
    let (instances, volumes, networks, images, users, projects) = futures_util::join!(
        instances.execute(client.list_instances()),
        volumes.execute(client.list_volumes()),
        networks.execute(client.list_networks()),
        images.execute(client.list_images()),
        users.execute(client.list_users()),
        projects.execute(client.list_projects()),
    );

    let cards = vec![
        card("Instances", "/instances", &instances),
        card("Volumes", "/volumes", &volumes),
        card("Networks", "/networks", &networks),
        card("Images", "/images", &images),
        card("Users", "/users", &users),
        card("Projects", "/projects", &projects),
    ];

    let (jar, TemplateGlobals { api_hostname, flash }) = build_template_globals(&state, jar);
    render_template(
        jar,
        DashboardTemplate {
            api_hostname,
            flash,
            active_nav: "dashboard",
            cards,
        },
    )
}
