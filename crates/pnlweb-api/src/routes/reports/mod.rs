//! Report routes
//!
//! Structure:
//! - page.rs: the six report views, full page or HTMX partial
//! - api.rs: route table and labels as JSON

pub mod api;
pub mod page;

pub use api::{api_report_labels, api_report_routes};
pub use page::report_page;
