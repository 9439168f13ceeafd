//! Credential provider port definition.

use async_trait::async_trait;

use crate::domain::entities::AwsCredentials;
use crate::domain::errors::CredentialsError;

/// Port producing the credentials store requests are signed with.
#[async_trait]
pub trait CredentialsPort: Send + Sync {
    /// Materializes credentials.
    async fn current_credentials(&self) -> Result<AwsCredentials, CredentialsError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock credential provider counting how often it is asked.
    pub struct MockCredentials {
        calls: Arc<AtomicUsize>,
        should_succeed: Arc<AtomicBool>,
        delay: Duration,
    }

    impl MockCredentials {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                delay: Duration::ZERO,
            }
        }

        /// Delays every answer.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }

        /// Number of materialization attempts so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Credentials handed out on success.
        pub fn credentials() -> AwsCredentials {
            AwsCredentials::new("AKIDEXAMPLE12345", "secret", None)
                .expect("static mock credentials are valid")
        }
    }

    #[async_trait]
    impl CredentialsPort for MockCredentials {
        async fn current_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Self::credentials())
            } else {
                Err(CredentialsError::NotFound)
            }
        }
    }
}
