use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::FetchHandle;
use crate::models::volume::{DEFAULT_AVAILABILITY_ZONE, DEFAULT_VOLUME_TYPE, MAX_VOLUME_SIZE_GB};
use crate::models::{
    ActionView, AppState, AttachVolumeRequest, CellView, CreateVolumeRequest, FieldView, Flash,
    FormView, Instance, OptionView, TableView, Volume, AVAILABILITY_ZONES, DEFAULT_ATTACH_DEVICE,
    VOLUME_TYPES,
};
use crate::utils::{api_path, format_status, parse_int_field, resource_status_class};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};

fn volume_table(volumes: &[Volume], instances: &[Instance]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Status", "Size", "Type", "Zone", "Attached to"],
        "No volumes yet.",
    );
    for vol in volumes {
        let base = api_path("/volumes", &[&vol.id]);
        let status = vol.status.as_deref().unwrap_or("");
        let mut actions = Vec::new();
        if vol.is_attached() {
            actions.push(
                ActionView::new("Detach", format!("{}/detach", base))
                    .with_input(FieldView::hidden("name", &vol.name)),
            );
        } else {
            let options = instances
                .iter()
                .map(|i| OptionView::new(&i.id, &i.name, false))
                .collect();
            actions.push(
                ActionView::new("Attach", format!("{}/attach", base))
                    .enabled(!instances.is_empty())
                    .with_input(FieldView::hidden("name", &vol.name))
                    .with_input(FieldView::select("instance_id", "Instance", options))
                    .with_input(FieldView::text("device", "Device").with_value(DEFAULT_ATTACH_DEVICE)),
            );
        }
        actions.push(
            ActionView::new("Delete", format!("{}/delete", base))
                .danger()
                .with_input(FieldView::hidden("name", &vol.name)),
        );
        table.push(
            vec![
                CellView::text(&vol.name),
                CellView::badge(format_status(status), resource_status_class(status)),
                CellView::text(vol.size.map(|s| format!("{} GB", s)).unwrap_or_else(|| "-".into())),
                CellView::maybe(vol.volume_type.clone()),
                CellView::maybe(vol.availability_zone.clone()),
                CellView::text(vol.attachment_summary()),
            ],
            actions,
        );
    }
    table
}

fn create_volume_form() -> FormView {
    FormView {
        action: "/volumes".to_string(),
        title: "Create volume".to_string(),
        submit_label: "Create Volume",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::number("size", "Size (GB)", 1, MAX_VOLUME_SIZE_GB)
                .required()
                .with_value("1"),
            FieldView::select("volume_type", "Volume type", OptionView::plain(VOLUME_TYPES, DEFAULT_VOLUME_TYPE)),
            FieldView::select(
                "availability_zone",
                "Availability zone",
                OptionView::plain(AVAILABILITY_ZONES, DEFAULT_AVAILABILITY_ZONE),
            ),
        ],
    }
}

pub async fn volumes_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let volumes = FetchHandle::new();
    let instances = FetchHandle::new();
    let (fetched, insts) = futures_util::join!(
        volumes.execute(state.client.list_volumes()),
        instances.execute(state.client.list_instances()),
    );
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    let insts: &[Instance] = insts.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "volumes",
        "Volumes",
        &fetched,
        volume_table(rows, insts),
        Some(create_volume_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateVolumeForm {
    pub name: String,
    pub size: Option<String>,
    pub volume_type: Option<String>,
    pub availability_zone: Option<String>,
}

impl CreateVolumeForm {
    fn into_request(self) -> Result<CreateVolumeRequest, String> {
        let size = parse_int_field("Size (GB)", self.size.as_deref())?.unwrap_or(0);
        let mut request = CreateVolumeRequest::new(self.name, size).map_err(|e| e.to_string())?;
        if let Some(kind) = non_empty(&self.volume_type) {
            request = request.with_volume_type(&kind).map_err(|e| e.to_string())?;
        }
        if let Some(zone) = non_empty(&self.availability_zone) {
            request = request.with_availability_zone(&zone).map_err(|e| e.to_string())?;
        }
        Ok(request)
    }
}

pub async fn volumes_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateVolumeForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match form.into_request() {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, "/volumes", Flash::failed("create", "volume", &name, e)),
    };
    let flash = match state.client.create_volume(&request).await {
        Ok(_) => Flash::success(format!("Volume \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "volume", request.name(), e),
    };
    redirect_with_flash(jar, "/volumes", flash)
}

#[derive(Deserialize, Debug)]
pub struct AttachVolumeForm {
    pub name: Option<String>,
    pub instance_id: String,
    pub device: Option<String>,
}

pub async fn volume_attach(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<AttachVolumeForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let device = non_empty(&form.device).unwrap_or_else(|| DEFAULT_ATTACH_DEVICE.to_string());
    let request = match AttachVolumeRequest::new(form.instance_id, device) {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, "/volumes", Flash::failed("attach", "volume", &name, e)),
    };
    let flash = match state.client.attach_volume(&id, &request).await {
        Ok(()) => Flash::success(format!("Volume \"{}\" attached successfully", name)),
        Err(e) => Flash::failed("attach", "volume", &name, e),
    };
    redirect_with_flash(jar, "/volumes", flash)
}

pub async fn volume_detach(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.detach_volume(&id).await {
        Ok(()) => Flash::success(format!("Volume \"{}\" detached successfully", name)),
        Err(e) => Flash::failed("detach", "volume", &name, e),
    };
    redirect_with_flash(jar, "/volumes", flash)
}

pub async fn volume_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.delete_volume(&id).await {
        Ok(()) => Flash::success(format!("Volume \"{}\" deleted successfully", name)),
        Err(e) => Flash::failed("delete", "volume", &name, e),
    };
    redirect_with_flash(jar, "/volumes", flash)
}
