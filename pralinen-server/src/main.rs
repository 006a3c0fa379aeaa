//! pralinen-server - praline rating service
//!
//! Startup: parse CLI, load TOML bootstrap config, initialize tracing,
//! resolve the root folder, open the database, and serve HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use pralinen_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use pralinen_server::api::BearerTokenGate;
use pralinen_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for pralinen-server
#[derive(Parser, Debug)]
#[command(name = "pralinen-server")]
#[command(about = "Praline rating service")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "PRALINEN_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "PRALINEN_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "PRALINEN_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Root folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TomlConfig::load(path),
        None => TomlConfig::load_default(),
    }
    .context("Failed to load configuration")?;

    // Logs go to the configured file, else stderr
    let file_layer = match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = file_layer
        .is_none()
        .then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "pralinen_server={0},pralinen_common={0},tower_http=info",
                    config.logging.level
                )
                .into()
            }),
        )
        .with(stderr_layer)
        .with(file_layer)
        .init();

    info!(
        "Starting pralinen-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder.clone())
        .with_toml_value(config.root_folder.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = config
        .database_path
        .clone()
        .unwrap_or_else(|| initializer.database_path());
    info!("Database: {}", db_path.display());

    let pool = pralinen_common::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;

    let gate = BearerTokenGate::new(config.admin_token_sha256.clone());
    if gate.is_open() {
        warn!("No admin_token_sha256 configured: admin routes are unauthenticated");
    } else {
        info!("Admin routes require a bearer token");
    }

    let state = AppState::new(pool, Arc::new(gate));
    let app = build_router(state);

    let bind_address = args.bind_address.unwrap_or(config.bind_address);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", bind_address, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind_address, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
