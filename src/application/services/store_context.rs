//! Init-once credential context shared by store calls.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::entities::AwsCredentials;
use crate::domain::errors::CredentialsError;
use crate::domain::ports::CredentialsPort;

/// Holds credentials once materialized.
///
/// Concurrent first callers share a single pending materialization. A failed
/// attempt is not kept: the next caller tries again.
pub struct StoreContext {
    provider: Arc<dyn CredentialsPort>,
    credentials: OnceCell<AwsCredentials>,
}

impl StoreContext {
    /// Creates a context that will ask `provider` for credentials.
    #[must_use]
    pub fn new(provider: Arc<dyn CredentialsPort>) -> Self {
        Self {
            provider,
            credentials: OnceCell::new(),
        }
    }

    /// Returns credentials, materializing them on first use.
    ///
    /// # Errors
    /// Returns error if the provider cannot produce credentials.
    pub async fn credentials(&self) -> Result<&AwsCredentials, CredentialsError> {
        self.credentials
            .get_or_try_init(|| async {
                debug!("Materializing store credentials");
                let credentials = self.provider.current_credentials().await?;
                info!(access_key = %credentials, "Store credentials ready");
                Ok(credentials)
            })
            .await
    }

    /// Returns whether credentials have been materialized.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.credentials.initialized()
    }
}
