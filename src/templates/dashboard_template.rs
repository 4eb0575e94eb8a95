use askama::Template;

use crate::models::{CardView, Flash};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub api_hostname: String,
    pub flash: Option<Flash>,
    pub active_nav: &'static str,
    pub cards: Vec<CardView>,
}

crate::impl_base_template!(DashboardTemplate);
