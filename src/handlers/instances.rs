use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::FetchHandle;
use crate::models::{
    ActionView, AppState, CellView, CreateInstanceRequest, FieldView, Flash, FormView, Image, Instance,
    Network, OptionView, PowerAction, TableView, FLAVORS,
};
use crate::utils::{age_since, api_path, format_status, resource_status_class};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};

fn instance_table(instances: &[Instance]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Status", "Flavor", "Image", "Private IP", "Public IP", "Age"],
        "No instances yet.",
    );
    for inst in instances {
        let base = api_path("/instances", &[&inst.id]);
        let name_input = || FieldView::hidden("name", &inst.name);
        let status = inst.status.as_deref().unwrap_or("");
        table.push(
            vec![
                CellView::text(&inst.name),
                CellView::badge(format_status(status), resource_status_class(status)),
                CellView::maybe(inst.flavor.clone()),
                CellView::maybe(inst.image.clone()),
                CellView::maybe(inst.private_ip.clone()),
                CellView::maybe(inst.public_ip.clone()),
                CellView::text(inst.created_at.as_deref().map(age_since).unwrap_or_else(|| "-".into())),
            ],
            vec![
                ActionView::new("Start", format!("{}/start", base))
                    .enabled(inst.can_start())
                    .with_input(name_input()),
                ActionView::new("Stop", format!("{}/stop", base))
                    .enabled(inst.can_stop())
                    .with_input(name_input()),
                ActionView::new("Reboot", format!("{}/reboot", base)).with_input(name_input()),
                ActionView::new("Delete", format!("{}/delete", base))
                    .danger()
                    .with_input(name_input()),
            ],
        );
    }
    table
}

fn create_instance_form(images: &[Image], networks: &[Network]) -> FormView {
    let flavors = FLAVORS
        .iter()
        .map(|f| OptionView::new(f.id, f.label(), f.id == "m1.small"))
        .collect();
    // Free text only when the image catalogue could not be listed.
    let image_field = if images.is_empty() {
        FieldView::text("image", "Image").required()
    } else {
        let options = images
            .iter()
            .map(|img| {
                let label = if img.name.is_empty() { &img.id } else { &img.name };
                OptionView::new(&img.id, label, false)
            })
            .collect();
        FieldView::select("image", "Image", options).required()
    };
    let network_field = if networks.is_empty() {
        FieldView::text("network_id", "Network ID")
    } else {
        let mut options = vec![OptionView::new("", "No network", false)];
        options.extend(networks.iter().map(|n| OptionView::new(&n.id, &n.name, false)));
        FieldView::select("network_id", "Network", options)
    };
    FormView {
        action: "/instances".to_string(),
        title: "Create instance".to_string(),
        submit_label: "Create Instance",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::select("flavor", "Flavor", flavors),
            image_field,
            network_field,
        ],
    }
}

pub async fn instances_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let instances = FetchHandle::new();
    let images = FetchHandle::new();
    let networks = FetchHandle::new();
    let (fetched, imgs, nets) = futures_util::join!(
        instances.execute(state.client.list_instances()),
        images.execute(state.client.list_images()),
        networks.execute(state.client.list_networks()),
    );
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    let imgs: &[Image] = imgs.data().map(Vec::as_slice).unwrap_or_default();
    let nets: &[Network] = nets.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "instances",
        "Instances",
        &fetched,
        instance_table(rows),
        Some(create_instance_form(imgs, nets)),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateInstanceForm {
    pub name: String,
    pub flavor: String,
    pub image: String,
    pub network_id: Option<String>,
}

pub async fn instances_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateInstanceForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match CreateInstanceRequest::new(form.name, form.flavor, form.image, non_empty(&form.network_id)) {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, "/instances", Flash::failed("create", "instance", &name, e)),
    };
    let flash = match state.client.create_instance(&request).await {
        Ok(_) => Flash::success(format!("Instance \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "instance", request.name(), e),
    };
    redirect_with_flash(jar, "/instances", flash)
}

async fn power(state: AppState, jar: CookieJar, id: String, form: RowActionForm, action: PowerAction) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.power_action(&id, action).await {
        Ok(()) => Flash::success(format!("Instance \"{}\" {} successfully", name, action.past_tense())),
        Err(e) => Flash::failed(action.as_path(), "instance", &name, e),
    };
    redirect_with_flash(jar, "/instances", flash)
}

pub async fn instance_start(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    power(state, jar, id, form, PowerAction::Start).await
}

pub async fn instance_stop(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    power(state, jar, id, form, PowerAction::Stop).await
}

pub async fn instance_reboot(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    power(state, jar, id, form, PowerAction::Reboot).await
}

pub async fn instance_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.delete_instance(&id).await {
        Ok(()) => Flash::success(format!("Instance \"{}\" deleted successfully", name)),
        Err(e) => Flash::failed("delete", "instance", &name, e),
    };
    redirect_with_flash(jar, "/instances", flash)
}
