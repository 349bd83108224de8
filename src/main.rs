//! Searchgate: a configuration-driven search API gateway
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use searchgate::config::Settings;
use searchgate::providers::ProviderRegistry;
use searchgate::store::UserStore;
use searchgate::web::{create_router, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "searchgate", version, about = "Configuration-driven search API gateway")]
struct Cli {
    /// Host to run the server on
    #[arg(long)]
    host: Option<String>,

    /// Port to run the server on
    #[arg(long)]
    port: Option<u16>,

    /// Path to settings.yml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the provider definitions file
    #[arg(long)]
    providers: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    info!("Starting searchgate v{}", searchgate::VERSION);

    // Load configuration; CLI flags win over file and environment
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        settings.server.bind_address = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(providers) = cli.providers {
        settings.providers_file = Some(providers);
    }

    // Load providers
    let registry = match settings.resolve_providers_file() {
        Some(path) => {
            info!("Loading providers from: {}", path.display());
            ProviderRegistry::load(&path, &settings.outgoing)?
        }
        None => {
            warn!("No provider config file found, starting with an empty registry");
            ProviderRegistry::new()
        }
    };
    info!("Loaded {} search providers", registry.len());

    // User settings store
    let store = UserStore::default_location();
    info!("Config storage: {}", store.path().display());

    // Application state and router
    let state = AppState::new(settings.clone(), registry, store);
    let app = create_router(state);

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Serving on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings(cli_path: Option<&Path>) -> Result<Settings> {
    // Explicit flag first
    if let Some(path) = cli_path {
        info!("Loading settings from: {}", path.display());
        let mut settings = Settings::from_file(path)?;
        settings.merge_env();
        return Ok(settings);
    }

    // Then the environment variable
    if let Ok(path) = std::env::var("SEARCHGATE_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Then the conventional locations
    let candidates = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("searchgate/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in candidates.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Fall back to defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
