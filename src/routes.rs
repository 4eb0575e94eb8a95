use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    let assets = Router::new()
        .route("/static/styles.css", get(handlers::stylesheet_get))
        .layer(
            ServiceBuilder::new().layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            )),
        );

    Router::new()
        .route("/", get(handlers::root_get))
        .route("/dashboard", get(handlers::dashboard_get))
        // Virtual machines
        .route("/compute", get(handlers::compute_get).post(handlers::compute_create))
        .route("/compute/:namespace/:name", get(handlers::vm_detail))
        .route("/compute/:namespace/:name/delete", post(handlers::vm_delete))
        // Infrastructure
        .route("/instances", get(handlers::instances_get).post(handlers::instances_create))
        .route("/instances/:id/start", post(handlers::instance_start))
        .route("/instances/:id/stop", post(handlers::instance_stop))
        .route("/instances/:id/reboot", post(handlers::instance_reboot))
        .route("/instances/:id/delete", post(handlers::instance_delete))
        .route("/networks", get(handlers::networks_get).post(handlers::networks_create))
        .route("/networks/:id/delete", post(handlers::network_delete))
        .route("/volumes", get(handlers::volumes_get).post(handlers::volumes_create))
        .route("/volumes/:id/attach", post(handlers::volume_attach))
        .route("/volumes/:id/detach", post(handlers::volume_detach))
        .route("/volumes/:id/delete", post(handlers::volume_delete))
        .route("/images", get(handlers::images_get).post(handlers::images_create))
        .route("/images/:id/delete", post(handlers::image_delete))
        // Identity
        .route("/users", get(handlers::users_get).post(handlers::users_create))
        .route("/users/:id/enable", post(handlers::user_enable))
        .route("/users/:id/disable", post(handlers::user_disable))
        .route("/users/:id/delete", post(handlers::user_delete))
        .route("/domains", get(handlers::domains_get).post(handlers::domains_create))
        .route("/domains/:id/delete", post(handlers::domain_delete))
        // Tenants
        .route("/projects", get(handlers::projects_get).post(handlers::projects_create))
        .route("/projects/:id/enable", post(handlers::project_enable))
        .route("/projects/:id/disable", post(handlers::project_disable))
        .route("/projects/:id/delete", post(handlers::project_delete))
        .route("/roles", get(handlers::roles_get).post(handlers::roles_create))
        .route("/roles/:id/delete", post(handlers::role_delete))
        .merge(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
