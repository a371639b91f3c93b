//! Handlers for `/committee`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/committee` | Optional `?role=Advisory\|Organizing\|TPC` |
//! | `POST`   | `/committee` | Admin; body: [`NewCommitteeMember`] |
//! | `PATCH`/`PUT` | `/committee`, `/committee/:id` | Admin; body: [`CommitteeMemberPatch`] with optional `id` |
//! | `DELETE` | `/committee?id=N` | Admin |

use axum::{Json, extract::State};
use confsite_core::{
  RecordId,
  committee::{CommitteeMember, CommitteeMemberPatch, CommitteeRole, NewCommitteeMember},
  store::SiteStore,
  validate::Validate,
};
use serde::Deserialize;
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

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `Advisory`, `Organizing` or `TPC`. Empty means no filter.
  pub role: Option<String>,
}

/// `GET /committee[?role=<role>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<CommitteeMember>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let role = params
    .role
    .as_deref()
    .filter(|r| !r.is_empty())
    .map(CommitteeRole::parse)
    .transpose()?;
  let members = state
    .store
    .list_committee(role)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(members))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /committee`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(input): ApiJson<NewCommitteeMember>,
) -> Result<Json<CommitteeMember>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  input.validate()?;
  let member = state
    .store
    .create_committee_member(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = member.id, role = member.role.as_ref(), "committee member created");
  Ok(Json(member))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /committee`: id in the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<CommitteeMember>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("committee member", None, body, |id, patch: CommitteeMemberPatch| {
    state.store.update_committee_member(id, patch)
  })
  .await
}

/// `PATCH /committee/:id`
pub async fn update_by_path<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(id): ApiPath<RecordId>,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<CommitteeMember>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::update("committee member", Some(id), body, |id, patch: CommitteeMemberPatch| {
    state.store.update_committee_member(id, patch)
  })
  .await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /committee?id=N`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Value>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  collection::delete("committee member", params, |id| {
    state.store.delete_committee_member(id)
  })
  .await
}
