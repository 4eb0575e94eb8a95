use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::FetchHandle;
use crate::models::{
    ActionView, AppState, CellView, CreateProjectRequest, CreateRoleRequest, FieldView, Flash,
    FormView, Project, Role, TableView,
};
use crate::utils::{age_since, api_path, enabled_label, parse_flag};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};
use super::identity::action_flash;

fn project_table(projects: &[Project]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Description", "Status", "Domain", "Created"],
        "No projects yet.",
    );
    for project in projects {
        let base = api_path("/projects", &[&project.id]);
        let (label, class) = enabled_label(project.enabled);
        let toggle = if project.enabled == Some(false) {
            ActionView::new("Enable", format!("{}/enable", base))
        } else {
            ActionView::new("Disable", format!("{}/disable", base))
        };
        table.push(
            vec![
                CellView::text(&project.name),
                CellView::maybe(project.description.clone()),
                CellView::badge(label, class),
                CellView::maybe(project.domain_id.clone()),
                CellView::text(project.created_at.as_deref().map(age_since).unwrap_or_else(|| "-".into())),
            ],
            vec![
                toggle.with_input(FieldView::hidden("name", &project.name)),
                ActionView::new("Delete", format!("{}/delete", base))
                    .danger()
                    .with_input(FieldView::hidden("name", &project.name)),
            ],
        );
    }
    table
}

fn create_project_form() -> FormView {
    FormView {
        action: "/projects".to_string(),
        title: "Create project".to_string(),
        submit_label: "Create Project",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::textarea("description", "Description"),
            FieldView::text("domain_id", "Domain ID"),
            FieldView::checkbox("enabled", "Enabled", true),
        ],
    }
}

pub async fn projects_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let projects = FetchHandle::new();
    let fetched = projects.execute(state.client.list_projects()).await;
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "projects",
        "Projects",
        &fetched,
        project_table(rows),
        Some(create_project_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateProjectForm {
    pub name: String,
    pub description: Option<String>,
    pub domain_id: Option<String>,
    pub enabled: Option<String>,
}

pub async fn projects_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateProjectForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateProjectRequest::new(form.name) {
        Ok(request) => request
            .with_description(form.description)
            .with_domain_id(non_empty(&form.domain_id))
            .with_enabled(parse_flag(form.enabled.as_deref(), false)),
        Err(e) => return redirect_with_flash(jar, "/projects", Flash::failed("create", "project", &name, e)),
    };
    let flash = match state.client.create_project(&request).await {
        Ok(_) => Flash::success(format!("Project \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "project", request.name(), e),
    };
    redirect_with_flash(jar, "/projects", flash)
}

pub async fn project_enable(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.enable_project(&id).await;
    redirect_with_flash(jar, "/projects", action_flash(result, "enable", "enabled", "project", &name))
}

pub async fn project_disable(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.disable_project(&id).await;
    redirect_with_flash(jar, "/projects", action_flash(result, "disable", "disabled", "project", &name))
}

pub async fn project_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.delete_project(&id).await;
    redirect_with_flash(jar, "/projects", action_flash(result, "delete", "deleted", "project", &name))
}

fn role_table(roles: &[Role]) -> TableView {
    let mut table = TableView::new(vec!["Name", "Description", "Created"], "No roles yet.");
    for role in roles {
        table.push(
            vec![
                CellView::text(&role.name),
                CellView::maybe(role.description.clone()),
                CellView::text(role.created_at.as_deref().map(age_since).unwrap_or_else(|| "-".into())),
            ],
            vec![ActionView::new("Delete", format!("{}/delete", api_path("/roles", &[&role.id])))
                .danger()
                .with_input(FieldView::hidden("name", &role.name))],
        );
    }
    table
}

fn create_role_form() -> FormView {
    FormView {
        action: "/roles".to_string(),
        title: "Create role".to_string(),
        submit_label: "Create Role",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::textarea("description", "Description"),
        ],
    }
}

pub async fn roles_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let roles = FetchHandle::new();
    let fetched = roles.execute(state.client.list_roles()).await;
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "roles",
        "Roles",
        &fetched,
        role_table(rows),
        Some(create_role_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateRoleForm {
    pub name: String,
    pub description: Option<String>,
}

pub async fn roles_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateRoleForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateRoleRequest::new(form.name, form.description) {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, "/roles", Flash::failed("create", "role", &name, e)),
    };
    let flash = match state.client.create_role(&request).await {
        Ok(_) => Flash::success(format!("Role \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "role", request.name(), e),
    };
    redirect_with_flash(jar, "/roles", flash)
}

pub async fn role_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.delete_role(&id).await;
    redirect_with_flash(jar, "/roles", action_flash(result, "delete", "deleted", "role", &name))
}
