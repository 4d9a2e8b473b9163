//! Muster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured recruit store, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use muster_core::{memory::MemoryStore, store::RecruitStore};
use muster_server::{ServerConfig, expand_tilde};
use muster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Muster recruiting pipeline server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Address to bind, overriding the configuration.
  #[arg(long)]
  host: Option<String>,

  /// Port to bind, overriding the configuration.
  #[arg(short, long)]
  port: Option<u16>,
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

  let server_cfg = ServerConfig::load(&cli.config, cli.host, cli.port)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  if server_cfg.uses_memory_store() {
    tracing::warn!("using in-memory store; records will not survive a restart");
    return serve(Arc::new(MemoryStore::new()), &server_cfg).await;
  }

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "opened sqlite store");

  serve(Arc::new(store), &server_cfg).await
}

async fn serve<S>(store: Arc<S>, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: RecruitStore + 'static,
{
  let app = muster_server::router(store, server_cfg);
  let address = server_cfg.address();

  tracing::info!(
    follow_up_days = server_cfg.follow_up_days,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
    Err(e) => {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  }
}
