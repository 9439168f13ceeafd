//! Domain layer with core entities, navigation types and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Navigation state carried in the location fragment.
pub mod navigation;
/// Page identifiers.
pub mod page;
/// Port definitions.
pub mod ports;

pub use entities::{AwsCredentials, Organization, OrganizationId};
pub use errors::{CredentialsError, StoreError};
pub use navigation::NavigationState;
pub use page::Page;
pub use ports::{CredentialStoragePort, CredentialsPort, OrganizationStorePort};
