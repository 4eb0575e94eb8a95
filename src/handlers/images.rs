use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::fetch::FetchHandle;
use crate::models::{
    ActionView, AppState, CellView, CreateImageRequest, FieldView, Flash, FormView, Image,
    OptionView, TableView, CONTAINER_FORMATS, DISK_FORMATS, VISIBILITIES,
};
use crate::utils::{api_path, format_bytes, format_status, parse_int_field, resource_status_class};

use super::helpers::{display_name, non_empty, redirect_with_flash, render_resource_page, RowActionForm};

fn image_table(images: &[Image]) -> TableView {
    let mut table = TableView::new(
        vec!["Name", "Status", "Visibility", "Disk format", "Container", "Size", "Min disk", "Min RAM"],
        "No images yet.",
    );
    for img in images {
        let status = img.status.as_deref().unwrap_or("");
        table.push(
            vec![
                CellView::text(&img.name),
                CellView::badge(format_status(status), resource_status_class(status)),
                CellView::maybe(img.visibility.clone()),
                CellView::maybe(img.disk_format.clone()),
                CellView::maybe(img.container_format.clone()),
                CellView::maybe(img.size.map(format_bytes)),
                CellView::maybe(img.min_disk.map(|d| format!("{} GB", d))),
                CellView::maybe(img.min_ram.map(|r| format!("{} MB", r))),
            ],
            vec![ActionView::new("Delete", format!("{}/delete", api_path("/images", &[&img.id])))
                .danger()
                .with_input(FieldView::hidden("name", &img.name))],
        );
    }
    table
}

fn create_image_form() -> FormView {
    FormView {
        action: "/images".to_string(),
        title: "Create image".to_string(),
        submit_label: "Create Image",
        fields: vec![
            FieldView::text("name", "Name").required(),
            FieldView::select("disk_format", "Disk format", OptionView::plain(DISK_FORMATS, "qcow2")),
            FieldView::select(
                "container_format",
                "Container format",
                OptionView::plain(CONTAINER_FORMATS, "bare"),
            ),
            FieldView::select("visibility", "Visibility", OptionView::plain(VISIBILITIES, "private")),
            FieldView::number("min_disk", "Min disk (GB)", 0, 65_536).with_value("0"),
            FieldView::number("min_ram", "Min RAM (MB)", 0, 4_194_304).with_value("0"),
        ],
    }
}

pub async fn images_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let images = FetchHandle::new();
    let fetched = images.execute(state.client.list_images()).await;
    let rows = fetched.data().map(Vec::as_slice).unwrap_or_default();
    render_resource_page(
        &state,
        jar,
        "images",
        "Images",
        &fetched,
        image_table(rows),
        Some(create_image_form()),
    )
}

#[derive(Deserialize, Debug)]
pub struct CreateImageForm {
    pub name: String,
    pub disk_format: String,
    pub container_format: String,
    pub visibility: Option<String>,
    pub min_disk: Option<String>,
    pub min_ram: Option<String>,
}

impl CreateImageForm {
    fn into_request(self) -> Result<CreateImageRequest, String> {
        let min_disk = parse_int_field("Min disk (GB)", self.min_disk.as_deref())?.unwrap_or(0);
        let min_ram = parse_int_field("Min RAM (MB)", self.min_ram.as_deref())?.unwrap_or(0);
        let mut request = CreateImageRequest::new(self.name, &self.disk_format, &self.container_format)
            .and_then(|r| r.with_minimums(min_disk, min_ram))
            .map_err(|e| e.to_string())?;
        if let Some(visibility) = non_empty(&self.visibility) {
            request = request.with_visibility(&visibility).map_err(|e| e.to_string())?;
        }
        Ok(request)
    }
}

pub async fn images_create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateImageForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let request = match form.into_request() {
        Ok(request) => request,
        Err(e) => return redirect_with_flash(jar, "/images", Flash::failed("create", "image", &name, e)),
    };
    let flash = match state.client.create_image(&request).await {
        Ok(_) => Flash::success(format!("Image \"{}\" created successfully", request.name())),
        Err(e) => Flash::failed("create", "image", request.name(), e),
    };
    redirect_with_flash(jar, "/images", flash)
}

pub async fn image_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RowActionForm>,
) -> Response {
    let name = display_name(&form.name, &id);
    let flash = match state.client.delete_image(&id).await {
        Ok(()) => Flash::success(format!("Image \"{}\" deleted successfully", name)),
        Err(e) => Flash::failed("delete", "image", &name, e),
    };
    redirect_with_flash(jar, "/images", flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(min_disk: &str) -> CreateImageForm {
        CreateImageForm {
            name: "cirros".into(),
            disk_format: "qcow2".into(),
            container_format: "bare".into(),
            visibility: Some("public".into()),
            min_disk: Some(min_disk.into()),
            min_ram: Some("".into()),
        }
    }

    #[test]
    fn test_blank_minimums_default_to_zero() {
        let body = serde_json::to_value(form("").into_request().unwrap()).unwrap();
        assert_eq!(body["minDisk"], 0);
        assert_eq!(body["minRam"], 0);
        assert_eq!(body["visibility"], "public");
    }

    #[test]
    fn test_garbage_minimum_is_rejected() {
        assert_eq!(form("lots").into_request().unwrap_err(), "Min disk (GB) must be a whole number");
    }

    #[test]
    fn test_size_is_humanized() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": "img-1", "name": "cirros", "size": 13_267_968u64
        }))
        .unwrap();
        let table = image_table(&[img]);
        assert_eq!(table.rows[0].cells[5].text, format_bytes(13_267_968));
    }
}
