//! Domain error types.

mod credentials_error;
mod secret_error;
mod store_error;

pub use credentials_error::CredentialsError;
pub use secret_error::SecretError;
pub use store_error::StoreError;
