use crate::models::Flash;

/// Common properties of every page rendered inside `base.html`.
pub trait BaseTemplate {
    fn api_hostname(&self) -> &str;
    fn flash(&self) -> Option<&Flash>;
    /// Navigation entry to highlight.
    fn active_nav(&self) -> &str;
}

/// Implement [`BaseTemplate`] for a struct carrying the standard fields
/// `api_hostname`, `flash` and `active_nav`.
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn api_hostname(&self) -> &str {
                &self.api_hostname
            }
            fn flash(&self) -> Option<&$crate::models::Flash> {
                self.flash.as_ref()
            }
            fn active_nav(&self) -> &str {
                self.active_nav
            }
        }
    };
}
