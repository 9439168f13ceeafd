//! Credential DTOs.

use crate::domain::entities::AwsCredentials;

/// Where credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Command-line flags or their environment variables.
    CommandLine,
    /// System keyring.
    Keyring,
}

impl CredentialSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CommandLine => "command line / environment",
            Self::Keyring => "system keyring",
        }
    }
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Credentials with their source.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    /// The credentials.
    pub credentials: AwsCredentials,
    /// Source of the credentials.
    pub source: CredentialSource,
}

impl ResolvedCredentials {
    /// Creates resolved credentials.
    #[must_use]
    pub const fn new(credentials: AwsCredentials, source: CredentialSource) -> Self {
        Self {
            credentials,
            source,
        }
    }
}
