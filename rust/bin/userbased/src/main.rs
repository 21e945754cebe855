//! `userbased`: the user record server.
//!
//! Usage:
//!   userbased [--listen <addr>] [--data-dir <dir>] [--db <file>]
//!
//! Records live in `{data-dir}/users.redb` unless `--db` names a file.

mod middleware;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use userbase_core::config::DEFAULT_LISTEN;
use userbase_core::{Module, ServiceConfig};
use userbase_kv::{KVStore, RedbStore};

/// User record server.
#[derive(Parser, Debug)]
#[command(name = "userbased", about = "User record server")]
struct Cli {
    /// Listen address.
    #[arg(long = "listen", env = "USERBASE_LISTEN", default_value = DEFAULT_LISTEN)]
    listen: String,

    /// Directory holding the record database.
    #[arg(long = "data-dir", env = "USERBASE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Database file (overrides `{data-dir}/users.redb`).
    #[arg(long = "db", env = "USERBASE_DB")]
    db: Option<PathBuf>,
}

impl Cli {
    fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_dir: Some(self.data_dir.clone()),
            db_path: self.db.clone(),
            listen: self.listen.clone(),
        }
    }
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
    let config = cli.service_config();

    // Initialize storage.
    if let Some(dir) = config.resolve_db_dir() {
        std::fs::create_dir_all(&dir)?;
    }
    let db_path = config.resolve_db_path();
    let kv: Arc<dyn KVStore> = Arc::new(
        RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open record store: {}", e))?,
    );
    info!("Record store opened at {}", db_path.display());

    let users_module = users::UsersModule::new(kv);
    info!("{} module initialized", users_module.name());

    let modules: Vec<Box<dyn Module>> = vec![Box::new(users_module)];
    let app = routes::build_router(&modules);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("userbased listening on {}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("userbased stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
