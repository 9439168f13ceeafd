use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "theatredb",
    version,
    about = "A terminal client for managing theatre organization records",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Location to open, e.g. `#p=edit-organization&id=42`.
    #[arg(short, long, value_name = "FRAGMENT")]
    pub fragment: Option<String>,

    /// Generated infrastructure output (region and pool identifiers).
    #[arg(long, value_name = "PATH")]
    pub infrastructure_output: Option<PathBuf>,

    /// Store region.
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Organization table name.
    #[arg(long)]
    pub table: Option<String>,

    /// Store endpoint override.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum number of organizations listed.
    #[arg(long)]
    pub scan_limit: Option<u32>,

    /// Access key id.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret access key.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Session token for temporary credentials.
    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Store command-line credentials in the system keyring.
    #[arg(long)]
    pub remember_credentials: bool,

    /// Delete credentials stored in the system keyring, then continue.
    #[arg(long)]
    pub forget_credentials: bool,
}
