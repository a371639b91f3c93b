//! Handlers for `/speakers`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/speakers` | Ordered by display order |
//! | `POST`   | `/speakers` | Admin; body: [`NewSpeaker`] |
//! | `PATCH`/`PUT` | `/speakers`, `/speakers/:id` | Admin; body: [`SpeakerPatch`] with optional `id` |
//! | `DELETE` | `/speakers?id=N` | Admin |

use axum::{Json, extract::State};
use confsite_core::{
  RecordId,
  speaker::{NewSpeaker, Speaker, SpeakerPatch},
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

/// `GET /speakers`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Speaker>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let speakers = state.store.list_speakers().await.map_err(ApiError::store)?;
  Ok(Json(speakers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /speakers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(input): ApiJson<NewSpeaker>,
) -> Result<Json<Speaker>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  input.validate()?;
  let speaker = state
    .store
    .create_speaker(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = speaker.id, "speaker created");
  Ok(Json(speaker))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /speakers`: id in the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Speaker>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("speaker", None, body, |id, patch: SpeakerPatch| {
    state.store.update_speaker(id, patch)
  })
  .await
}

/// `PATCH /speakers/:id`
pub async fn update_by_path<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(id): ApiPath<RecordId>,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Speaker>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("speaker", Some(id), body, |id, patch: SpeakerPatch| {
    state.store.update_speaker(id, patch)
  })
  .await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /speakers?id=N`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::delete("speaker", params, |id| state.store.delete_speaker(id)).await
}
