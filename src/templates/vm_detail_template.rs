use askama::Template;

use crate::models::Flash;

#[derive(Template)]
#[template(path = "vm_detail.html")]
pub struct VmDetailTemplate {
    pub api_hostname: String,
    pub flash: Option<Flash>,
    pub active_nav: &'static str,
    pub name: String,
    pub namespace: String,
    pub status_label: String,
    pub status_class: &'static str,
    /// Label/value pairs in display order.
    pub facts: Vec<(&'static str, String)>,
    pub labels: Vec<(String, String)>,
    pub delete_action: String,
}

crate::impl_base_template!(VmDetailTemplate);
