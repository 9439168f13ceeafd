//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use super::infrastructure_output::InfrastructureOutput;
use crate::application::services::DEFAULT_SCAN_LIMIT;
use crate::infrastructure::dynamodb::DEFAULT_TABLE_NAME;

pub(super) const APP_NAME: &str = "theatredb";
pub(super) const APP_QUALIFIER: &str = "org";
pub(super) const APP_ORGANIZATION: &str = "theatredb";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI
/// flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the generated `infrastructure-output.json`.
    #[serde(default)]
    pub infrastructure_output: Option<PathBuf>,

    /// Region override; otherwise taken from the infrastructure output.
    #[serde(default)]
    pub region: Option<String>,

    /// Organization table name.
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Endpoint override, e.g. `http://localhost:8000` for a local DynamoDB.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Maximum number of organizations fetched for the list.
    #[serde(default = "default_scan_limit")]
    pub scan_limit: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            infrastructure_output: None,
            region: None,
            table_name: default_table_name(),
            endpoint: None,
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Picks the configured region, falling back to the infrastructure output.
    #[must_use]
    pub fn resolve_region(&self, output: Option<&InfrastructureOutput>) -> Option<String> {
        self.region
            .clone()
            .filter(|r| !r.trim().is_empty())
            .or_else(|| output.map(|o| o.region.clone()))
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Reopen the last location on start when no `--fragment` is given.
    #[serde(default = "default_true")]
    pub restore_last_location: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            restore_last_location: true,
        }
    }
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

const fn default_scan_limit() -> u32 {
    DEFAULT_SCAN_LIMIT
}

const fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            store: StoreConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(path) = &args.infrastructure_output {
            self.store.infrastructure_output = Some(path.clone());
        }
        if let Some(region) = &args.region {
            self.store.region = Some(region.clone());
        }
        if let Some(table) = &args.table {
            self.store.table_name.clone_from(table);
        }
        if let Some(endpoint) = &args.endpoint {
            self.store.endpoint = Some(endpoint.clone());
        }
        if let Some(scan_limit) = args.scan_limit {
            self.store.scan_limit = scan_limit;
        }
        // The store rejects a zero limit.
        self.store.scan_limit = self.store.scan_limit.max(1);
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("theatredb.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"

            [store]
            infrastructure_output = "config/infrastructure-output.json"
            endpoint = "http://localhost:8000"
            scan_limit = 10

            [ui]
            restore_last_location = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.store.endpoint.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.store.scan_limit, 10);
        assert_eq!(config.store.table_name, DEFAULT_TABLE_NAME);
        assert!(!config.ui.restore_last_location);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.store.scan_limit, 50);
        assert_eq!(config.store.table_name, "theatredb.organizations");
        assert!(config.store.region.is_none());
        assert!(config.ui.restore_last_location);
    }

    #[test]
    fn test_args_override_config() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "theatredb",
            "--log-level",
            "warn",
            "--region",
            "us-east-1",
            "--table",
            "orgs",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.store.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.store.table_name, "orgs");
    }

    #[test]
    fn test_zero_scan_limit_clamped() {
        let mut config: AppConfig = toml::from_str("[store]\nscan_limit = 0").unwrap();
        config.merge_with_args(&CliArgs::parse_from(["theatredb"]));
        assert_eq!(config.store.scan_limit, 1);

        let mut config = AppConfig::default();
        config.merge_with_args(&CliArgs::parse_from(["theatredb", "--scan-limit", "0"]));
        assert_eq!(config.store.scan_limit, 1);
    }

    #[test]
    fn test_region_falls_back_to_infrastructure_output() {
        let output = InfrastructureOutput {
            region: "us-west-2".to_string(),
            user_pool_id: "pool".to_string(),
            user_pool_client_id: "client".to_string(),
            identity_pool_id: "identity".to_string(),
        };
        let mut store = StoreConfig::default();

        assert_eq!(store.resolve_region(Some(&output)).as_deref(), Some("us-west-2"));

        store.region = Some("eu-west-1".to_string());
        assert_eq!(store.resolve_region(Some(&output)).as_deref(), Some("eu-west-1"));
        assert_eq!(StoreConfig::default().resolve_region(None), None);
    }
}
