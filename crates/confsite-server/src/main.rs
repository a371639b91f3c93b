//! confsite server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `CONFSITE_*` environment variables, opens the SQLite store, and serves the
//! JSON API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use confsite_api::{AdminAuth, AppState};
use confsite_server::ServerConfig;
use confsite_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Conference site API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load server config")?;

  if server_cfg.admin_secret.is_empty() {
    tracing::warn!("admin_secret is empty; every admin request will be rejected");
  }

  let database_url = server_cfg.resolved_database_url();
  let store = SqliteStore::connect(&database_url)
    .await
    .with_context(|| format!("failed to open store at {database_url}"))?;

  let state = AppState::new(store, AdminAuth::new(server_cfg.admin_secret.clone()));
  let app = confsite_server::app(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
