//! Domain entities.

mod credentials;
mod organization;

pub use credentials::AwsCredentials;
pub use organization::{Organization, OrganizationId, SparseRecord, sort_by_name};
