use axum::extract::{Form, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::{FetchHandle, VmList, VmListState};
use crate::models::{
    ActionView, AppState, CellView, FieldView, Flash, FormView, OptionView, TableView, Vm,
    VmCreateRequest, ValidationError, CPU_OPTIONS, DEFAULT_VM_IMAGE, MEMORY_OPTIONS,
};
use crate::templates::{ComputeTemplate, VmDetailTemplate};
use crate::utils::{
    age_since, api_path, build_query_string, format_local, parse_flag, parse_optional_int,
    vm_status_class,
};

use super::helpers::{
    build_template_globals, merge_flash, non_empty, redirect_with_flash, render_template,
    TemplateGlobals,
};

const PAGE_SIZES: &[u32] = &[10, 20, 50, 100];

#[derive(Deserialize, Debug, Default)]
pub struct ComputeQuery {
    pub namespace: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn compute_href(namespace: &str, page: u32, page_size: u32) -> String {
    let q = build_query_string(&[
        ("namespace", namespace.to_string()),
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
    ]);
    format!("/compute?{}", q)
}

fn compute_list_href(namespace: &str) -> String {
    format!("/compute?{}", build_query_string(&[("namespace", namespace.to_string())]))
}

fn vm_href(vm: &Vm) -> String {
    format!("/compute{}", api_path("", &[&vm.namespace, &vm.name]))
}

fn vm_table(vms: &[Vm]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Status", "CPU", "Memory", "Image", "IP Address", "Node", "Age"],
        "No virtual machines in this namespace.",
    );
    for vm in vms {
        let delete = ActionView::new("Delete", format!("{}/delete", vm_href(vm))).danger();
        table.push(
            vec![
                CellView::link(&vm.name, vm_href(vm)),
                CellView::badge(vm.status.to_string(), vm_status_class(vm.status)),
                CellView::text(format!("{} vCPU", vm.cpu_cores)),
                CellView::text(&vm.memory),
                CellView::text(&vm.image),
                CellView::maybe(vm.ip_address.clone()),
                CellView::maybe(vm.node_name.clone()),
                CellView::text(age_since(&vm.created_at)),
            ],
            vec![delete],
        );
    }
    table
}

fn create_vm_form(namespace: &str) -> FormView {
    let cpu = CPU_OPTIONS
        .iter()
        .map(|c| OptionView::new(c.to_string(), format!("{} vCPU", c), *c == 2))
        .collect();
    let memory = MEMORY_OPTIONS
        .iter()
        .map(|m| OptionView::new(m.to_string(), format!("{} GB", m), *m == 4))
        .collect();
    FormView {
        action: "/compute".to_string(),
        title: "Create virtual machine".to_string(),
        submit_label: "Create VM",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::text("namespace", "Namespace").required().with_value(namespace),
            FieldView::select("cpu_cores", "CPU", cpu),
            FieldView::select("memory_gb", "Memory", memory),
            FieldView::text("image", "Image").required().with_value(DEFAULT_VM_IMAGE),
            FieldView::textarea("description", "Description"),
            FieldView::text("labels", "Labels (key=value, comma separated)"),
            FieldView::password("password", "Password"),
            FieldView::password("confirm_password", "Confirm password"),
            FieldView::checkbox("enable_public_ip", "Assign public IP", true),
        ],
    }
}

fn page_size_options(current: u32) -> Vec<OptionView> {
    let mut sizes = PAGE_SIZES.to_vec();
    if !sizes.contains(&current) {
        sizes.push(current);
        sizes.sort_unstable();
    }
    sizes
        .into_iter()
        .map(|s| OptionView::new(s.to_string(), s.to_string(), s == current))
        .collect()
}

pub async fn compute_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ComputeQuery>,
) -> Response {
    let namespace = non_empty(&query.namespace).unwrap_or_else(|| state.default_namespace().to_string());
    let page_size = query.page_size.unwrap_or_else(|| state.default_page_size());
    let list = VmList::new(state.client.clone(), &namespace, page_size);
    let VmListState {
        vms,
        error,
        pagination,
        stats,
        ..
    } = list.fetch_vms(query.page.unwrap_or(1)).await;

    let load_error = error.map(|e| Flash::error(format!("Failed to fetch VMs: {}", e)));
    let page_size = list.page_size();
    let prev_href = pagination
        .has_previous
        .then(|| compute_href(&namespace, pagination.page.saturating_sub(1).max(1), page_size));
    let next_href = pagination
        .has_next
        .then(|| compute_href(&namespace, pagination.page + 1, page_size));
    let refresh_href = compute_href(&namespace, pagination.page, page_size);

    let (jar, TemplateGlobals { api_hostname, flash }) = build_template_globals(&state, jar);
    render_template(
        jar,
        ComputeTemplate {
            api_hostname,
            flash: merge_flash(flash, load_error),
            active_nav: "compute",
            table: vm_table(&vms),
            page_size_options: page_size_options(page_size),
            prev_href,
            next_href,
            refresh_href,
            form: create_vm_form(&namespace),
            namespace,
            pagination,
            stats,
        },
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateVmForm {
    pub name: String,
    pub namespace: String,
    pub cpu_cores: Option<String>,
    pub memory_gb: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub labels: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub enable_public_ip: Option<String>,
}

impl CreateVmForm {
    pub fn into_request(self) -> Result<VmCreateRequest, ValidationError> {
        let cpu = parse_optional_int(self.cpu_cores.as_deref()).unwrap_or(2);
        let memory = parse_optional_int(self.memory_gb.as_deref()).unwrap_or(4);
        let image = non_empty(&self.image).unwrap_or_else(|| DEFAULT_VM_IMAGE.to_string());
        // Out-of-range values are clamped into u32 and rejected by the constructor.
        let cpu = u32::try_from(cpu).unwrap_or(0);
        let memory = u32::try_from(memory).unwrap_or(0);
        VmCreateRequest::new(self.name, self.namespace, cpu, memory, image)?
            .with_description(self.description)
            .with_labels(self.labels)
            .with_public_ip(parse_flag(self.enable_public_ip.as_deref(), false))
            .with_password(
                self.password.as_deref().unwrap_or(""),
                self.confirm_password.as_deref().unwrap_or(""),
            )
    }
}

pub async fn compute_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateVmForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let back = compute_list_href(form.namespace.trim());
    let request = match form.into_request() {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, &back, Flash::failed("create", "VM", &name, e)),
    };
    let back = compute_list_href(request.namespace());
    let flash = match state.client.create_vm(&request).await {
        Ok(_) => Flash::success(format!("VM \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "VM", request.name(), e),
    };
    redirect_with_flash(jar, &back, flash)
}

pub async fn vm_detail(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let handle = FetchHandle::new();
    let fetched = handle.execute(state.client.get_vm(&namespace, &name)).await;
    let Some(vm) = fetched.data else {
        let reason = fetched.error.unwrap_or_default();
        return redirect_with_flash(
            jar,
            &compute_list_href(&namespace),
            Flash::error(format!("Failed to fetch VM details: {}", reason)),
        );
    };

    let facts = vec![
        ("Namespace", vm.namespace.clone()),
        ("Phase", vm.phase.to_string()),
        ("CPU", format!("{} vCPU", vm.cpu_cores)),
        ("Memory", vm.memory.clone()),
        ("Image", vm.image.clone()),
        ("Description", vm.description.clone().unwrap_or_else(|| "-".into())),
        ("IP address", vm.ip_address.clone().unwrap_or_else(|| "-".into())),
        ("Public IP", vm.public_ip_address.clone().unwrap_or_else(|| "-".into())),
        ("Node", vm.node_name.clone().unwrap_or_else(|| "-".into())),
        ("CPU usage", vm.cpu_usage.clone().unwrap_or_else(|| "-".into())),
        ("Memory usage", vm.memory_usage.clone().unwrap_or_else(|| "-".into())),
        ("Created", format_local(&vm.created_at)),
        ("Updated", format_local(&vm.updated_at)),
        ("Age", age_since(&vm.created_at)),
    ];
    let mut labels: Vec<(String, String)> = vm.labels.clone().unwrap_or_default().into_iter().collect();
    labels.sort();

    let (jar, TemplateGlobals { api_hostname, flash }) = build_template_globals(&state, jar);
    render_template(
        jar,
        VmDetailTemplate {
            api_hostname,
            flash,
            active_nav: "compute",
            status_label: vm.status.to_string(),
            status_class: vm_status_class(vm.status),
            delete_action: format!("{}/delete", vm_href(&vm)),
            name: vm.name,
            namespace: vm.namespace,
            facts,
            labels,
        },
    )
}

pub async fn vm_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let flash = match state.client.delete_vm(&namespace, &name).await {
        Ok(()) => Flash::success(format!("VM \"{}\" deleted successfully", name)),
        Err(e) => Flash::failed("delete", "VM", &name, e),
    };
    redirect_with_flash(jar, &compute_list_href(&namespace), flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(cpu: &str, password: &str, confirm: &str) -> CreateVmForm {
        CreateVmForm {
            name: "vm1".into(),
            namespace: "narek".into(),
            cpu_cores: Some(cpu.into()),
            memory_gb: Some("4".into()),
            image: Some("".into()),
            description: None,
            labels: None,
            password: Some(password.into()),
            confirm_password: Some(confirm.into()),
            enable_public_ip: Some("on".into()),
        }
    }

    #[test]
    fn test_form_defaults_image_and_public_ip() {
        let request = form("2", "", "").into_request().unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["image"], DEFAULT_VM_IMAGE);
        assert_eq!(body["enablePublicIp"], true);
        assert!(body.get("password").is_none());
    }

    #[test]
    fn test_form_rejects_bad_cpu_and_password() {
        assert!(form("-3", "", "").into_request().is_err());
        assert_eq!(
            form("2", "secret1", "secret2").into_request().unwrap_err(),
            ValidationError::PasswordMismatch
        );
    }

    #[test]
    fn test_page_size_options_include_current() {
        let opts = page_size_options(25);
        assert!(opts.iter().any(|o| o.value == "25" && o.selected));
        assert_eq!(opts.len(), 5);
    }

    #[test]
    fn test_vm_href_encodes_segments() {
        let vm: Vm = serde_json::from_value(serde_json::json!({"name": "a b", "namespace": "ns"})).unwrap();
        assert_eq!(vm_href(&vm), "/compute/ns/a%20b");
    }
}
