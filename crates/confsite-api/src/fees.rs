//! Handlers for `/fees`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/fees` | Ordered by `order`, then id |
//! | `POST`   | `/fees` | Admin; body: [`NewRegistrationFee`] |
//! | `PATCH`/`PUT` | `/fees`, `/fees/:id` | Admin; body: [`RegistrationFeePatch`] with optional `id` |
//! | `DELETE` | `/fees?id=N` | Admin |

use axum::{Json, extract::State};
use confsite_core::{
  RecordId,
  fee::{NewRegistrationFee, RegistrationFee, RegistrationFeePatch},
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

/// `GET /fees`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<RegistrationFee>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let fees = state.store.list_fees().await.map_err(ApiError::store)?;
  Ok(Json(fees))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /fees`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(input): ApiJson<NewRegistrationFee>,
) -> Result<Json<RegistrationFee>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  input.validate()?;
  let fee = state
    .store
    .create_fee(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = fee.id, "registration fee created");
  Ok(Json(fee))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /fees`: id in the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<RegistrationFee>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("registration fee", None, body, |id, patch: RegistrationFeePatch| {
    state.store.update_fee(id, patch)
  })
  .await
}

/// `PATCH /fees/:id`
pub async fn update_by_path<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(id): ApiPath<RecordId>,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<RegistrationFee>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("registration fee", Some(id), body, |id, patch: RegistrationFeePatch| {
    state.store.update_fee(id, patch)
  })
  .await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /fees?id=N`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::delete("registration fee", params, |id| state.store.delete_fee(id)).await
}
