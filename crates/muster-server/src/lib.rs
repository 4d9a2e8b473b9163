//! HTTP server wiring for Muster.
//!
//! Loads [`ServerConfig`] and mounts the JSON API under `/api` next to a
//! `/health` probe.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use muster_core::{aggregate::DEFAULT_FOLLOW_UP_DAYS, store::RecruitStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// `store_path` value that selects the in-memory store.
pub const MEMORY_STORE_PATH: &str = ":memory:";

/// Prefix for environment overrides, e.g. `MUSTER_PORT=8080`.
pub const ENV_PREFIX: &str = "MUSTER";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// A recruit is overdue once more than this many days pass without contact.
  pub follow_up_days: u32,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_owned(),
      port:           5000,
      store_path:     PathBuf::from("muster.sqlite3"),
      follow_up_days: DEFAULT_FOLLOW_UP_DAYS,
    }
  }
}

impl ServerConfig {
  /// Layer, lowest precedence first: built-in defaults, the TOML file at
  /// `path` (if it exists), `MUSTER_*` environment variables, then the
  /// explicit `host`/`port` overrides.
  pub fn load(
    path: &Path,
    host: Option<String>,
    port: Option<u16>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .set_override_option("host", host)?
      .set_override_option("port", port.map(i64::from))?
      .build()?
      .try_deserialize()
  }

  pub fn uses_memory_store(&self) -> bool {
    self.store_path.as_os_str() == MEMORY_STORE_PATH
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  let rest = match s.as_ref() {
    "~" => "",
    s => match s.strip_prefix("~/") {
      Some(rest) => rest,
      None => return path.to_path_buf(),
    },
  };
  match std::env::var("HOME") {
    Ok(home) => PathBuf::from(home).join(rest),
    Err(_) => path.to_path_buf(),
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: RecruitStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", muster_api::api_router(store, config.follow_up_days))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }

// ─── Tests ────────────────────────────────────────────────────────────────────
