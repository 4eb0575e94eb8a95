use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::FetchHandle;
use crate::models::{
    ActionView, AppState, CellView, CreateNetworkRequest, FieldView, Flash, FormView, Network,
    TableView,
};
use crate::utils::{api_path, format_status, parse_flag, resource_status_class};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};

fn yes_no(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    }
}

fn network_table(networks: &[Network]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Status", "Admin state", "Shared", "Subnets", "Tenant"],
        "No networks yet.",
    );
    for net in networks {
        let status = net.status.as_deref().unwrap_or("");
        let admin = match net.admin_state_up {
            Some(true) => "Up",
            Some(false) => "Down",
            None => "-",
        };
        table.push(
            vec![
                CellView::text(&net.name),
                CellView::badge(format_status(status), resource_status_class(status)),
                CellView::text(admin),
                CellView::text(yes_no(net.shared)),
                CellView::text(net.subnet_summary()),
                CellView::maybe(net.tenant_id.clone()),
            ],
            vec![ActionView::new("Delete", format!("{}/delete", api_path("/networks", &[&net.id])))
                .danger()
                .with_input(FieldView::hidden("name", &net.name))],
        );
    }
    table
}

fn create_network_form() -> FormView {
    FormView {
        action: "/networks".to_string(),
        title: "Create network".to_string(),
        submit_label: "Create Network",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::text("tenant_id", "Tenant ID"),
            FieldView::checkbox("admin_state_up", "Admin state up", true),
            FieldView::checkbox("shared", "Shared", false),
        ],
    }
}

pub async fn networks_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let networks = FetchHandle::new();
    let fetched = networks.execute(state.client.list_networks()).await;
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "networks",
        "Networks",
        &fetched,
        network_table(rows),
        Some(create_network_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateNetworkForm {
    pub name: String,
    pub tenant_id: Option<String>,
    pub admin_state_up: Option<String>,
    pub shared: Option<String>,
}

pub async fn networks_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateNetworkForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateNetworkRequest::new(form.name) {
        Ok(request) => request
            .with_admin_state_up(parse_flag(form.admin_state_up.as_deref(), false))
            .with_shared(parse_flag(form.shared.as_deref(), false))
            .with_tenant_id(non_empty(&form.tenant_id)),
        Err(e) => return redirect_with_flash(jar, "/networks", Flash::failed("create", "network", &name, e)),
    };
    let flash = match state.client.create_network(&request).await {
        Ok(_) => Flash::success(format!("Network \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "network", request.name(), e),
    };
    redirect_with_flash(jar, "/networks", flash)
}

pub async fn network_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.delete_network(&id).await {
        Ok(()) => Flash::success(format!("Network \"{}\" deleted successfully", name)),
        Err(e) => Flash::failed("delete", "network", &name, e),
    };
    redirect_with_flash(jar, "/networks", flash)
}
