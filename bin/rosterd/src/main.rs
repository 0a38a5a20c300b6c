//! `rosterd` — the roster server binary.
//!
//! Usage:
//!   rosterd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/roster/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use auth::service::{AuthService, GateConfig};
use auth::AuthModule;
use registry::service::RegistryService;
use registry::RegistryModule;
use roster_core::{AccountDirectory, Module};

use config::ServerConfig;

/// Roster server.
#[derive(Parser, Debug)]
#[command(name = "rosterd", about = "Roster record-management server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the configured one).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("loading configuration from {}", config_path.display());
    let config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&config)?;

    let listen = cli.listen.unwrap_or_else(|| config.listen.clone());

    // Initialize storage.
    std::fs::create_dir_all(&config.storage.data_dir)?;
    let sql: Arc<dyn roster_sql::SQLStore> = Arc::new(
        roster_sql::SqliteStore::open(&config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // Record store — also serves as the gateway's account directory.
    let registry_svc = RegistryService::new(sql)
        .map_err(|e| anyhow::anyhow!("failed to initialize registry: {}", e))?;
    bootstrap::ensure_admin_account(&registry_svc, &config)?;

    // Token gateway. The signing secret is injected here, once; it is
    // immutable for the process lifetime.
    let directory: Arc<dyn AccountDirectory> = registry_svc.clone();
    let auth_svc = AuthService::new(
        directory,
        GateConfig {
            jwt_secret: config.jwt.secret.clone(),
            token_ttl_secs: config.jwt.expire_secs,
        },
    );

    let auth_module = AuthModule::new(auth_svc.clone());
    let registry_module = RegistryModule::new(registry_svc);
    info!("auth and registry modules initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (registry_module.name(), registry_module.routes()),
    ];

    let app = routes::build_router(auth_svc, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("roster server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
