mod credential_storage_port;
mod credentials_port;
mod organization_store_port;

pub use credential_storage_port::CredentialStoragePort;
pub use credentials_port::CredentialsPort;
pub use organization_store_port::OrganizationStorePort;
