use askama::Template;

use crate::models::{Flash, FormView, TableView};

/// List-plus-create page shared by every infrastructure, identity and
/// tenant resource.
#[derive(Template)]
#[template(path = "resources.html")]
pub struct ResourcePageTemplate {
    pub api_hostname: String,
    pub flash: Option<Flash>,
    pub active_nav: &'static str,
    pub title: &'static str,
    pub table: TableView,
    pub form: Option<FormView>,
}

crate::impl_base_template!(ResourcePageTemplate);
