use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use theatredb::application::{
    HashRouter, OrganizationService, ResolveCredentialsUseCase, StoreContext,
};
use theatredb::domain::AwsCredentials;
use theatredb::infrastructure::{
    AppConfig, CliArgs, DynamoDbClient, InfrastructureOutput, KeyringCredentialStorage, Settings,
};
use theatredb::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn explicit_credentials(args: &CliArgs) -> Option<AwsCredentials> {
    let access_key_id = args.access_key_id.clone()?;
    let secret_access_key = args.secret_access_key.clone()?;
    AwsCredentials::new(access_key_id, secret_access_key, args.session_token.clone())
}

fn build_store(config: &AppConfig) -> Result<DynamoDbClient> {
    let output = match &config.store.infrastructure_output {
        Some(path) => Some(InfrastructureOutput::load(path)?),
        None => None,
    };
    let region = config
        .store
        .resolve_region(output.as_ref())
        .ok_or_else(|| eyre!("no region configured; pass --region or --infrastructure-output"))?;

    let client = match &config.store.endpoint {
        Some(endpoint) => {
            DynamoDbClient::with_endpoint(endpoint, &region, config.store.table_name.clone())?
        }
        None => DynamoDbClient::new(&region, config.store.table_name.clone()),
    };
    info!(
        region = %region,
        table = %client.table_name(),
        endpoint = client.endpoint().map(|u| u.as_str()),
        "Store configured"
    );
    Ok(client)
}

fn initial_fragment(args: &CliArgs, config: &AppConfig, settings: &Settings) -> String {
    if let Some(fragment) = &args.fragment {
        return fragment.clone();
    }
    if config.ui.restore_last_location {
        return settings.last_fragment().unwrap_or_default();
    }
    String::new()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let settings = Settings::locate()?;
    let mut config = settings.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;
    info!(version = theatredb::VERSION, "Starting {}", theatredb::NAME);

    let credential_storage = Arc::new(KeyringCredentialStorage::new());
    let credentials =
        ResolveCredentialsUseCase::new(credential_storage, explicit_credentials(&args))
            .remember(args.remember_credentials);
    if args.forget_credentials {
        credentials.forget().await?;
    }

    let store = Arc::new(build_store(&config)?);
    let context = Arc::new(StoreContext::new(Arc::new(credentials)));
    let service = Arc::new(
        OrganizationService::new(store, context).with_scan_limit(config.store.scan_limit),
    );

    let router = Arc::new(HashRouter::new(&initial_fragment(&args, &config, &settings)));
    let app = App::new(Arc::clone(&router), service);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = settings.remember_fragment(&router.fragment()) {
        warn!(error = %e, "Failed to save session");
    }

    result
}
