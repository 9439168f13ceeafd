//! Data transfer objects for the application layer.

mod credentials_dto;

pub use credentials_dto::{CredentialSource, ResolvedCredentials};
