//! Credential materialization error types.

use thiserror::Error;

/// Credential error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CredentialsError {
    #[error("no credentials available from command line, environment or keyring")]
    NotFound,
}
