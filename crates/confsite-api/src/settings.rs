//! Handlers for `/settings`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/settings` | `{}` until the row exists |
//! | `PATCH`/`PUT` | `/settings` | Admin; body: [`SettingsPatch`]; upsert |

use axum::{
  Json,
  extract::State,
  response::{IntoResponse, Response},
};
use confsite_core::{
  settings::{Settings, SettingsPatch},
  store::SiteStore,
  validate::Validate,
};
use serde_json::json;

use crate::{AppState, auth::Admin, error::ApiError, extract::ApiJson};

/// `GET /settings`
pub async fn get<S>(State(state): State<AppState<S>>) -> Result<Response, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let settings = state.store.get_settings().await.map_err(ApiError::store)?;
  Ok(match settings {
    Some(s) => Json(s).into_response(),
    None => Json(json!({})).into_response(),
  })
}

/// `PATCH /settings`: creates the row on first write.
pub async fn upsert<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(patch): ApiJson<SettingsPatch>,
) -> Result<Json<Settings>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  patch.validate()?;
  let settings = state
    .store
    .upsert_settings(patch)
    .await
    .map_err(ApiError::store)?;
  tracing::info!("settings updated");
  Ok(Json(settings))
}
