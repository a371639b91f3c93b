//! HTTP server for the conference site: configuration and the top-level
//! router that mounts [`confsite_api`] under `/api`.

use std::path::{Path, PathBuf};

use axum::Router;
use confsite_api::{AppState, api_router};
use confsite_core::store::SiteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

const ENV_PREFIX: &str = "CONFSITE";

/// Runtime server configuration, deserialised from `config.toml` and
/// `CONFSITE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// A path, `sqlite://<path>`, or `:memory:`.
  #[serde(default = "default_database_url")]
  pub database_url: String,
  /// Shared admin secret. Empty rejects every protected request.
  #[serde(default)]
  pub admin_secret: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_database_url() -> String { "sqlite://confsite.db".to_string() }

impl ServerConfig {
  /// Layer the `CONFSITE_*` environment over the optional TOML file at
  /// `path`. Values stay strings until they meet a typed field, so a secret
  /// like `007` is kept verbatim.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with(path, config::Environment::with_prefix(ENV_PREFIX))
  }

  fn load_with(path: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The connection string with a leading `~/` in its path expanded.
  pub fn resolved_database_url(&self) -> String {
    let (scheme, path) = match self.database_url.strip_prefix("sqlite://") {
      Some(rest) => ("sqlite://", rest),
      None => ("", self.database_url.as_str()),
    };
    format!("{scheme}{}", expand_tilde(Path::new(path)).display())
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api` with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: SiteStore + Clone + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use confsite_api::AdminAuth;
  use confsite_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn config(database_url: &str) -> ServerConfig {
    ServerConfig {
      host:         default_host(),
      port:         default_port(),
      database_url: database_url.to_string(),
      admin_secret: String::new(),
    }
  }

  fn load_from_env(vars: &[(&str, &str)]) -> ServerConfig {
    let vars = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<HashMap<_, _>>();
    let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));
    ServerConfig::load_with(Path::new("no-such-config.toml"), env).unwrap()
  }

  #[test]
  fn load_defaults_without_file_or_env() {
    let cfg = load_from_env(&[]);
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.database_url, "sqlite://confsite.db");
    assert_eq!(cfg.admin_secret, "");
  }

  #[test]
  fn numeric_looking_secret_kept_verbatim() {
    let cfg = load_from_env(&[("CONFSITE_ADMIN_SECRET", "007"), ("CONFSITE_PORT", "8080")]);
    assert_eq!(cfg.admin_secret, "007");
    assert_eq!(cfg.port, 8080);
  }

  #[test]
  fn address_joins_host_and_port() {
    assert_eq!(config(":memory:").address(), "127.0.0.1:3000");
  }

  #[test]
  fn database_url_without_tilde_is_unchanged() {
    assert_eq!(config("sqlite://site.db").resolved_database_url(), "sqlite://site.db");
    assert_eq!(config(":memory:").resolved_database_url(), ":memory:");
  }

  #[test]
  fn database_url_tilde_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    let resolved = config("sqlite://~/confsite.db").resolved_database_url();
    assert_eq!(resolved, format!("sqlite://{}", Path::new(&home).join("confsite.db").display()));
  }

  #[tokio::test]
  async fn api_mounted_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let state = AppState::new(store, AdminAuth::new("k"));

    let req = Request::builder().uri("/api/speakers").body(Body::empty()).unwrap();
    let resp = app(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/speakers").body(Body::empty()).unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn empty_secret_locks_admin_routes() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let state = AppState::new(store, AdminAuth::new(config(":memory:").admin_secret));

    let req = Request::builder()
      .method("DELETE")
      .uri("/api/speakers?id=1")
      .header("x-admin-key", "")
      .body(Body::empty())
      .unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
