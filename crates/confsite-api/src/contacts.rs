//! Handlers for `/contacts`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/contacts` | Insertion order |
//! | `POST`   | `/contacts` | Admin; body: [`NewContact`] |
//! | `PATCH`/`PUT` | `/contacts`, `/contacts/:id` | Admin; body: [`ContactPatch`] with optional `id` |
//! | `DELETE` | `/contacts?id=N` | Admin |

use axum::{Json, extract::State};
use confsite_core::{
  RecordId,
  contact::{Contact, ContactPatch, NewContact},
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

/// `GET /contacts`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let contacts = state.store.list_contacts().await.map_err(ApiError::store)?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(input): ApiJson<NewContact>,
) -> Result<Json<Contact>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  input.validate()?;
  let contact = state
    .store
    .create_contact(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = contact.id, "contact created");
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts`: id in the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Contact>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("contact", None, body, |id, patch: ContactPatch| {
    state.store.update_contact(id, patch)
  })
  .await
}

/// `PATCH /contacts/:id`
pub async fn update_by_path<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(id): ApiPath<RecordId>,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Contact>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("contact", Some(id), body, |id, patch: ContactPatch| {
    state.store.update_contact(id, patch)
  })
  .await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts?id=N`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::delete("contact", params, |id| state.store.delete_contact(id)).await
}
