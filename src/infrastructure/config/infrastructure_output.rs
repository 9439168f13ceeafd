//! Generated infrastructure output (`infrastructure-output.json`).
//!
//! Each entry is an output object of the form `{"value": ...}`; extra fields
//! such as `type` or `sensitive` are ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::settings::ConfigError;

#[derive(Debug, Deserialize)]
struct OutputValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    region: OutputValue,
    user_pool_id: OutputValue,
    user_pool_client_id: OutputValue,
    identity_pool_id: OutputValue,
}

/// Region and identity identifiers provisioned for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfrastructureOutput {
    /// Region hosting the table and pools.
    pub region: String,
    /// User pool id.
    pub user_pool_id: String,
    /// User pool web client id.
    pub user_pool_client_id: String,
    /// Identity pool id.
    pub identity_pool_id: String,
}

impl InfrastructureOutput {
    /// Parses the JSON artifact.
    ///
    /// # Errors
    /// Returns `ConfigError` if the document is not valid or lacks an entry.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let raw: RawOutput = serde_json::from_str(content)?;
        Ok(Self {
            region: raw.region.value,
            user_pool_id: raw.user_pool_id.value,
            user_pool_client_id: raw.user_pool_client_id.value,
            identity_pool_id: raw.identity_pool_id.value,
        })
    }

    /// Reads and parses the artifact at `path`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let output = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            region = %output.region,
            user_pool = %output.user_pool_id,
            identity_pool = %output.identity_pool_id,
            "Infrastructure output loaded"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "identity_pool_id": {"sensitive": false, "type": "string", "value": "us-west-2:1234"},
        "region": {"sensitive": false, "type": "string", "value": "us-west-2"},
        "user_pool_client_id": {"sensitive": false, "type": "string", "value": "client"},
        "user_pool_id": {"sensitive": false, "type": "string", "value": "us-west-2_abc"}
    }"#;

    #[test]
    fn test_parse_output() {
        let output = InfrastructureOutput::from_json(SAMPLE).unwrap();

        assert_eq!(output.region, "us-west-2");
        assert_eq!(output.user_pool_id, "us-west-2_abc");
        assert_eq!(output.user_pool_client_id, "client");
        assert_eq!(output.identity_pool_id, "us-west-2:1234");
    }

    #[test]
    fn test_missing_entry_is_error() {
        let result = InfrastructureOutput::from_json(r#"{"region": {"value": "us-west-2"}}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infrastructure-output.json");
        std::fs::write(&path, SAMPLE).unwrap();

        assert_eq!(InfrastructureOutput::load(&path).unwrap().region, "us-west-2");
    }
}
