//! Document store error types.

use thiserror::Error;

/// Store error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("credentials unavailable: {0}")]
    Credentials(#[from] super::CredentialsError),

    #[error("network error: {message}")]
    Network { message: String },

    #[error("store rejected request ({status}): {kind}: {message}")]
    Service {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("malformed store response: {message}")]
    MalformedResponse { message: String },

    #[error("item is missing its key attribute `{attribute}`")]
    MissingKey { attribute: String },

    #[error("unexpected store error: {message}")]
    Unexpected { message: String },
}

impl StoreError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates service error from an HTTP status and service error payload.
    #[must_use]
    pub fn service(status: u16, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates missing key error.
    #[must_use]
    pub fn missing_key(attribute: impl Into<String>) -> Self {
        Self::MissingKey {
            attribute: attribute.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the short service error type, e.g. `ResourceNotFoundException`.
    #[must_use]
    pub fn service_kind(&self) -> Option<&str> {
        match self {
            Self::Service { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = StoreError::service(400, "ResourceNotFoundException", "table not found");
        assert_eq!(
            err.to_string(),
            "store rejected request (400): ResourceNotFoundException: table not found"
        );
        assert_eq!(err.service_kind(), Some("ResourceNotFoundException"));
    }

    #[test]
    fn test_credentials_error_converts() {
        let err: StoreError = super::super::CredentialsError::NotFound.into();
        assert!(matches!(err, StoreError::Credentials(_)));
        assert_eq!(err.service_kind(), None);
    }
}
