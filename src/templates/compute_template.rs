use askama::Template;

use crate::fetch::{Pagination, StatusCounts};
use crate::models::{Flash, FormView, OptionView, TableView};

#[derive(Template)]
#[template(path = "compute.html")]
pub struct ComputeTemplate {
    pub api_hostname: String,
    pub flash: Option<Flash>,
    pub active_nav: &'static str,
    pub namespace: String,
    pub table: TableView,
    pub pagination: Pagination,
    pub stats: StatusCounts,
    pub page_size_options: Vec<OptionView>,
    /// Links to the neighbouring pages, present only when the server says
    /// they exist.
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub refresh_href: String,
    pub form: FormView,
}

crate::impl_base_template!(ComputeTemplate);
