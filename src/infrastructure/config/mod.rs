//! Application configuration.

pub mod app_config;
pub mod args;
pub mod infrastructure_output;
pub mod settings;

pub use app_config::{AppConfig, LogLevel, StoreConfig, UiConfig};
pub use args::CliArgs;
pub use infrastructure_output::InfrastructureOutput;
pub use settings::{ConfigError, Settings};
