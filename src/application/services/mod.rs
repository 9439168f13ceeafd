//! Application services.

mod organization_service;
mod store_context;

pub use organization_service::{DEFAULT_SCAN_LIMIT, OrganizationService};
pub use store_context::StoreContext;
