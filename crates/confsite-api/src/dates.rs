//! Handlers for `/dates`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/dates` | Chronological; unparsable dates keep their place |
//! | `POST`   | `/dates` | Admin; body: [`NewImportantDate`] |
//! | `PATCH`/`PUT` | `/dates`, `/dates/:id` | Admin; body: [`ImportantDatePatch`] with optional `id` |
//! | `DELETE` | `/dates?id=N` | Admin |

use axum::{Json, extract::State};
use confsite_core::{
  RecordId,
  date::{ImportantDate, ImportantDatePatch, NewImportantDate},
  store::SiteStore,
  validate::Validate,
};
use serde_json::{Map, Value};

use crate::{
  AppState,
  auth::Admin,
  collection,
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
  params::IdParams,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /dates`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<ImportantDate>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let dates = state.store.list_dates().await.map_err(ApiError::store)?;
  Ok(Json(dates))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /dates`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(input): ApiJson<NewImportantDate>,
) -> Result<Json<ImportantDate>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  input.validate()?;
  let date = state
    .store
    .create_date(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = date.id, "important date created");
  Ok(Json(date))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /dates`: id in the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<ImportantDate>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("important date", None, body, |id, patch: ImportantDatePatch| {
    state.store.update_date(id, patch)
  })
  .await
}

/// `PATCH /dates/:id`
pub async fn update_by_path<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(id): ApiPath<RecordId>,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<ImportantDate>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("important date", Some(id), body, |id, patch: ImportantDatePatch| {
    state.store.update_date(id, patch)
  })
  .await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /dates?id=N`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::delete("important date", params, |id| state.store.delete_date(id)).await
}
