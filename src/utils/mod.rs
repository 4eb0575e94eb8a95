// URL handling utilities
pub mod url_encoding;
pub mod url_parser;
pub mod query_string;

// Parsing utilities
pub mod parse_flag;
pub mod parse_int;

// Display utilities
pub mod bytes;
pub mod status_formatter;
pub mod timestamps;

// Re-export all utilities for convenient access
pub use url_encoding::{api_path, encode_segment};
pub use url_parser::hostname_from_url;
pub use query_string::build_query_string;
pub use parse_flag::parse_flag;
pub use parse_int::{parse_int_field, parse_optional_int};
pub use bytes::format_bytes;
pub use status_formatter::{enabled_label, format_status, resource_status_class, vm_status_class};
pub use timestamps::{age_since, format_age, format_local, parse_server_timestamp};
