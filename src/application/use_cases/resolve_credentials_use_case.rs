//! Credential resolution use case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::dto::{CredentialSource, ResolvedCredentials};
use crate::domain::entities::AwsCredentials;
use crate::domain::errors::{CredentialsError, SecretError};
use crate::domain::ports::{CredentialStoragePort, CredentialsPort};

/// Resolves store credentials from the available sources.
pub struct ResolveCredentialsUseCase {
    storage_port: Arc<dyn CredentialStoragePort>,
    explicit: Option<AwsCredentials>,
    remember: bool,
}

impl ResolveCredentialsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        storage_port: Arc<dyn CredentialStoragePort>,
        explicit: Option<AwsCredentials>,
    ) -> Self {
        Self {
            storage_port,
            explicit,
            remember: false,
        }
    }

    /// Stores command-line credentials in the keyring once resolved.
    #[must_use]
    pub const fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// Resolves credentials.
    ///
    /// Priority:
    /// 1. CLI/Env (passed at construction)
    /// 2. Keyring
    ///
    /// # Errors
    /// Returns `NotFound` if no source has credentials.
    pub async fn execute(&self) -> Result<ResolvedCredentials, CredentialsError> {
        if let Some(credentials) = &self.explicit {
            info!(access_key = %credentials, "Using credentials from command line / environment");
            if self.remember {
                match self.storage_port.store_credentials(credentials).await {
                    Ok(()) => info!("Credentials persisted to secure storage"),
                    Err(e) => warn!(error = %e, "Failed to persist credentials"),
                }
            }
            return Ok(ResolvedCredentials::new(
                credentials.clone(),
                CredentialSource::CommandLine,
            ));
        }

        debug!("Checking keyring for stored credentials");
        match self.storage_port.get_credentials().await {
            Ok(Some(credentials)) => {
                info!(access_key = %credentials, "Using credentials from system keyring");
                return Ok(ResolvedCredentials::new(
                    credentials,
                    CredentialSource::Keyring,
                ));
            }
            Ok(None) => debug!("No credentials found in keyring"),
            Err(e) => debug!(error = %e, "Failed to check keyring"),
        }

        debug!("No credentials found in any source");
        Err(CredentialsError::NotFound)
    }

    /// Deletes stored credentials.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn forget(&self) -> Result<(), SecretError> {
        debug!("Deleting credentials from secure storage");
        self.storage_port.delete_credentials().await?;
        info!("Credentials deleted from secure storage");
        Ok(())
    }
}

#[async_trait]
impl CredentialsPort for ResolveCredentialsUseCase {
    async fn current_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        self.execute().await.map(|resolved| resolved.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockCredentialStorage;

    fn creds(key: &str) -> AwsCredentials {
        AwsCredentials::new(key, "secret", None).unwrap()
    }

    #[tokio::test]
    async fn test_command_line_priority() {
        let storage = Arc::new(MockCredentialStorage::with_credentials(creds("KEYRINGKEY01")));
        let use_case = ResolveCredentialsUseCase::new(storage, Some(creds("CLIKEY000001")));

        let resolved = use_case.execute().await.unwrap();

        assert_eq!(resolved.source, CredentialSource::CommandLine);
        assert_eq!(resolved.credentials.access_key_id(), "CLIKEY000001");
    }

    #[tokio::test]
    async fn test_keyring_fallback() {
        let storage = Arc::new(MockCredentialStorage::with_credentials(creds("KEYRINGKEY01")));
        let use_case = ResolveCredentialsUseCase::new(storage, None);

        let resolved = use_case.execute().await.unwrap();

        assert_eq!(resolved.source, CredentialSource::Keyring);
    }

    #[tokio::test]
    async fn test_no_credentials_found() {
        let use_case = ResolveCredentialsUseCase::new(Arc::new(MockCredentialStorage::new()), None);
        assert!(matches!(
            use_case.execute().await,
            Err(CredentialsError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_keyring_failure_is_not_found() {
        let use_case =
            ResolveCredentialsUseCase::new(Arc::new(MockCredentialStorage::failing()), None);
        assert!(matches!(
            use_case.current_credentials().await,
            Err(CredentialsError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_remember_persists_command_line_credentials() {
        let storage = Arc::new(MockCredentialStorage::new());
        let use_case = ResolveCredentialsUseCase::new(storage.clone(), Some(creds("CLIKEY000001")))
            .remember(true);

        use_case.execute().await.unwrap();

        assert!(storage.has_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_without_remember_nothing_stored() {
        let storage = Arc::new(MockCredentialStorage::new());
        let use_case = ResolveCredentialsUseCase::new(storage.clone(), Some(creds("CLIKEY000001")));

        use_case.execute().await.unwrap();

        assert!(!storage.has_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_forget_deletes() {
        let storage = Arc::new(MockCredentialStorage::with_credentials(creds("KEYRINGKEY01")));
        let use_case = ResolveCredentialsUseCase::new(storage.clone(), None);

        use_case.forget().await.unwrap();

        assert!(!storage.has_credentials().await.unwrap());
    }
}
