//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// DynamoDB organization store.
pub mod dynamodb;
/// Credential storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, ConfigError, InfrastructureOutput, LogLevel, Settings};
pub use dynamodb::{DEFAULT_TABLE_NAME, DynamoDbClient};
pub use storage::KeyringCredentialStorage;
