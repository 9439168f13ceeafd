//! Credential storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AwsCredentials;
use crate::domain::errors::SecretError;

/// Port for persisting credentials between runs.
#[async_trait]
pub trait CredentialStoragePort: Send + Sync {
    /// Retrieves stored credentials.
    async fn get_credentials(&self) -> Result<Option<AwsCredentials>, SecretError>;

    /// Stores credentials securely.
    async fn store_credentials(&self, credentials: &AwsCredentials) -> Result<(), SecretError>;

    /// Deletes stored credentials.
    async fn delete_credentials(&self) -> Result<(), SecretError>;

    /// Checks if credentials exist.
    async fn has_credentials(&self) -> Result<bool, SecretError> {
        Ok(self.get_credentials().await?.is_some())
    }
}
