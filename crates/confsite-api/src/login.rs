//! `POST /admin/login`: lets the admin client check its key before use.

use axum::{Json, extract::State};
use confsite_core::store::SiteStore;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError, extract::ApiJson};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub password: String,
}

/// `POST /admin/login`: body: `{"password":"..."}`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  if !state.auth.accepts(&body.password) {
    tracing::warn!("failed admin login");
    return Err(ApiError::InvalidCredentials);
  }
  Ok(Json(json!({ "success": true })))
}
