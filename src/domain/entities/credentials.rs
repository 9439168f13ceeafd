//! AWS credential value object.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Access key pair used to sign store requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_token: Option<Zeroizing<String>>,
}

impl AwsCredentials {
    /// Creates credentials, trimming surrounding whitespace.
    ///
    /// Returns `None` if either key is blank.
    #[must_use]
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Option<Self> {
        let access_key_id = access_key_id.into().trim().to_string();
        let secret_access_key = Zeroizing::new(secret_access_key.into().trim().to_string());
        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return None;
        }

        let session_token = session_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Zeroizing::new);

        Some(Self {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }

    /// Returns the access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Returns the session token for temporary credentials.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref().map(String::as_str)
    }

    /// Returns masked access key for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.access_key_id.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.masked())
            .field("session", &self.session_token.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ID: &str = "AKIDEXAMPLE12345";
    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_blank_keys_rejected() {
        assert!(AwsCredentials::new("", SECRET, None).is_none());
        assert!(AwsCredentials::new(KEY_ID, "   ", None).is_none());
    }

    #[test]
    fn test_blank_session_token_dropped() {
        let creds = AwsCredentials::new(KEY_ID, SECRET, Some("  ".to_string())).unwrap();
        assert_eq!(creds.session_token(), None);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let creds = AwsCredentials::new(KEY_ID, SECRET, Some("token".to_string())).unwrap();
        let output = format!("{creds:?} {creds}");

        assert!(!output.contains(SECRET));
        assert!(!output.contains(KEY_ID));
        assert!(output.contains("AKID...2345"));
    }

    #[test]
    fn test_masked_counts_characters() {
        let short = AwsCredentials::new("aééééé", "secret", None).unwrap();
        assert_eq!(short.to_string(), "******");

        let long = AwsCredentials::new("éKIDEXAMPLE1234ü", "secret", None).unwrap();
        assert_eq!(long.masked(), "éKID...234ü");
    }

    #[test]
    fn test_json_round_trip_for_keyring() {
        let creds = AwsCredentials::new(KEY_ID, SECRET, None).unwrap();
        let json = serde_json::to_string(&creds).unwrap();
        let back: AwsCredentials = serde_json::from_str(&json).unwrap();

        assert_eq!(back, creds);
        assert!(!json.contains("session_token"));
    }
}
