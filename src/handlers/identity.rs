use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::ApiError;
use crate::fetch::FetchHandle;
use crate::models::{
    ActionView, AppState, CellView, CreateDomainRequest, CreateUserRequest, Domain, FieldView,
    Flash, FormView, OptionView, TableView, User,
};
use crate::utils::{age_since, api_path, enabled_label, parse_flag};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};

fn toggle_action(base: &str, enabled: Option<bool>, name: &str) -> ActionView {
    let action = if enabled == Some(false) {
        ActionView::new("Enable", format!("{}/enable", base))
    } else {
        ActionView::new("Disable", format!("{}/disable", base))
    };
    action.with_input(FieldView::hidden("name", name))
}

fn user_table(users: &[User]) -> TableView {
    let mut table = TableView::new(vec!["Name", "Email", "Status", "Domain", "Created"], "No users yet.");
    for user in users {
        let base = api_path("/users", &[&user.id]);
        let (label, class) = enabled_label(user.enabled);
        table.push(
            vec![
                CellView::text(&user.name),
                CellView::maybe(user.email.clone()),
                CellView::badge(label, class),
                CellView::maybe(user.domain_id.clone()),
                CellView::text(user.created_at.as_deref().map(age_since).unwrap_or_else(|| "-".into())),
            ],
            vec![
                toggle_action(&base, user.enabled, &user.name),
                ActionView::new("Delete", format!("{}/delete", base))
                    .danger()
                    .with_input(FieldView::hidden("name", &user.name)),
            ],
        );
    }
    table
}

fn create_user_form(domains: &[Domain]) -> FormView {
    let domain_field = if domains.is_empty() {
        FieldView::text("domain_id", "Domain ID")
    } else {
        let options = domains
            .iter()
            .map(|d| OptionView::new(&d.id, &d.name, d.id == "default"))
            .collect();
        FieldView::select("domain_id", "Domain", options)
    };
    FormView {
        action: "/users".to_string(),
        title: "Create user".to_string(),
        submit_label: "Create User",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::email("email", "Email").required(),
            FieldView::password("password", "Password").required(),
            domain_field,
            FieldView::checkbox("enabled", "Enabled", true),
        ],
    }
}

pub async fn users_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let users = FetchHandle::new();
    let domains = FetchHandle::new();
    let (fetched, doms) = futures_util::join!(
        users.execute(state.client.list_users()),
        domains.execute(state.client.list_domains()),
    );
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    let doms: &[Domain] = doms.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "users",
        "Users",
        &fetched,
        user_table(rows),
        Some(create_user_form(doms)),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub domain_id: Option<String>,
    pub enabled: Option<String>,
}

pub async fn users_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateUserForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateUserRequest::new(form.name, form.email, form.password) {
        Ok(request) => request
            .with_domain_id(non_empty(&form.domain_id))
            .with_enabled(parse_flag(form.enabled.as_deref(), false)),
        Err(e) => return redirect_with_flash(jar, "/users", Flash::failed("create", "user", &name, e)),
    };
    let flash = match state.client.create_user(&request).await {
        Ok(_) => Flash::success(format!("User \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "user", request.name(), e),
    };
    redirect_with_flash(jar, "/users", flash)
}

/// Shared tail of the per-row user and project actions.
pub(super) fn action_flash(
    result: Result<(), ApiError>,
    verb: &str,
    past: &str,
    kind: &str,
    name: &str,
) -> Flash {
    match result {
        Ok(()) => {
            let mut label = kind.to_string();
            if let Some(first) = label.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            Flash::success(format!("{} \"{}\" {} successfully", label, name, past))
        }
        Err(e) => Flash::failed(verb, kind, name, e),
    }
}

pub async fn user_enable(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.enable_user(&id).await;
    redirect_with_flash(jar, "/users", action_flash(result, "enable", "enabled", "user", &name))
}

pub async fn user_disable(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.disable_user(&id).await;
    redirect_with_flash(jar, "/users", action_flash(result, "disable", "disabled", "user", &name))
}

pub async fn user_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.delete_user(&id).await;
    redirect_with_flash(jar, "/users", action_flash(result, "delete", "deleted", "user", &name))
}

fn domain_table(domains: &[Domain]) -> TableView {
    let mut table = TableView::new(vec!["Name", "Description", "Status", "Created"], "No domains yet.");
    for domain in domains {
        let (label, class) = enabled_label(domain.enabled);
        table.push(
            vec![
                CellView::text(&domain.name),
                CellView::maybe(domain.description.clone()),
                CellView::badge(label, class),
                CellView::text(domain.created_at.as_deref().map(age_since).unwrap_or_else(|| "-".into())),
            ],
            vec![ActionView::new("Delete", format!("{}/delete", api_path("/domains", &[&domain.id])))
                .danger()
                .with_input(FieldView::hidden("name", &domain.name))],
        );
    }
    table
}

fn create_domain_form() -> FormView {
    FormView {
        action: "/domains".to_string(),
        title: "Create domain".to_string(),
        submit_label: "Create Domain",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::textarea("description", "Description"),
            FieldView::checkbox("enabled", "Enabled", true),
        ],
    }
}

pub async fn domains_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let domains = FetchHandle::new();
    let fetched = domains.execute(state.client.list_domains()).await;
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "domains",
        "Domains",
        &fetched,
        domain_table(rows),
        Some(create_domain_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateDomainForm {
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<String>,
}

pub async fn domains_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateDomainForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateDomainRequest::new(form.name) {
        Ok(request) => request
            .with_description(form.description)
            .with_enabled(parse_flag(form.enabled.as_deref(), false)),
        Err(e) => return redirect_with_flash(jar, "/domains", Flash::failed("create", "domain", &name, e)),
    };
    let flash = match state.client.create_domain(&request).await {
        Ok(_) => Flash::success(format!("Domain \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "domain", request.name(), e),
    };
    redirect_with_flash(jar, "/domains", flash)
}

pub async fn domain_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let result = state.client.delete_domain(&id).await;
    redirect_with_flash(jar, "/domains", action_flash(result, "delete", "deleted", "domain", &name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_follows_enabled_flag() {
        assert_eq!(toggle_action("/users/u1", Some(false), "a").label, "Enable");
        assert_eq!(toggle_action("/users/u1", Some(true), "a").label, "Disable");
        assert_eq!(toggle_action("/users/u1", Some(true), "a").action, "/users/u1/disable");
    }

    #[test]
    fn test_action_flash_messages() {
        let ok = action_flash(Ok(()), "enable", "enabled", "user", "alice");
        assert_eq!(ok.message, "User \"alice\" enabled successfully");
        let err = action_flash(
            Err(ApiError::Transport("Network Error".into())),
            "delete",
            "deleted",
            "user",
            "alice",
        );
        assert!(err.is_error());
        assert_eq!(err.message, "Failed to delete user \"alice\": Network Error");
    }
}
