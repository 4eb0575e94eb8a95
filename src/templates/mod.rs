// Base template trait for the shared layout
pub mod base_template;
pub use base_template::BaseTemplate;

// Page templates
pub mod compute_template;
pub mod dashboard_template;
pub mod resource_page_template;
pub mod vm_detail_template;

pub use compute_template::ComputeTemplate;
pub use dashboard_template::DashboardTemplate;
pub use resource_page_template::ResourcePageTemplate;
pub use vm_detail_template::VmDetailTemplate;
