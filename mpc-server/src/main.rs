//! mpc-server - Mobile Price Compare HTTP API
//!
//! Startup order: CLI args → bootstrap TOML (+ `MPC_*` env overrides) →
//! tracing → database (+ optional sample seed) → HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mpc_common::config::load_toml_config;
use mpc_common::db::{init_database, seed::seed_sample_data};
use mpc_server::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "mpc-server")]
#[command(about = "Mobile phone price-compare catalog API")]
#[command(version)]
struct Args {
    /// HTTP port (overrides config `server.port`)
    #[arg(short, long, env = "MPC_PORT")]
    port: Option<u16>,

    /// Bind address (overrides config `server.host`)
    #[arg(long, env = "MPC_HOST")]
    host: Option<String>,

    /// SQLite database file (overrides config `database.path`)
    #[arg(short, long, env = "MPC_DATABASE")]
    database: Option<PathBuf>,

    /// Bootstrap config file (else MPC_CONFIG, else the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip seeding sample data into an empty database
    #[arg(long)]
    no_seed: bool,
}

/// Filter directive for our crates at `level`; full directives pass through
fn default_filter(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    ["mpc_server", "mpc_ingest", "mpc_ai", "mpc_common", "tower_http"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_toml_config(args.config.as_deref()).context("Failed to load config")?;
    config.apply_env_overrides();

    let default_directive = default_filter(&config.logging.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mpc-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(database) = args.database {
        config.database.path = Some(database);
    }
    if args.no_seed {
        config.site.seed_sample_data = false;
    }

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());
    let db = init_database(&db_path, config.database.max_connections)
        .await
        .context("Failed to initialize database")?;

    if config.site.seed_sample_data {
        match seed_sample_data(&db).await {
            Ok(true) => info!("Seeded sample catalog"),
            Ok(false) => info!("Catalog already populated, skipping sample seed"),
            Err(e) => warn!("Sample seed failed: {}", e),
        }
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let state = AppState::new(db, config);
    let app = build_router(state);

    info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
