//! Update and delete plumbing shared by the id-keyed collections.

use std::future::Future;

use axum::Json;
use confsite_core::{RecordId, validate::Validate};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::{
  error::ApiError,
  params::{IdParams, PatchBody},
};

/// Parse a patch body, resolve its target id against `path_id` and hand both
/// to `apply`. An unknown id is a 404 naming `noun`.
pub async fn update<P, T, E, F, Fut>(
  noun: &str,
  path_id: Option<RecordId>,
  body: Map<String, Value>,
  apply: F,
) -> Result<Json<T>, ApiError>
where
  P: DeserializeOwned + Validate,
  E: std::error::Error + Send + Sync + 'static,
  F: FnOnce(RecordId, P) -> Fut,
  Fut: Future<Output = Result<Option<T>, E>>,
{
  let body = PatchBody::<P>::parse(body)?;
  let id = body.target(path_id)?;
  let record = apply(id, body.patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{noun} {id} not found")))?;
  tracing::info!(id, "{noun} updated");
  Ok(Json(record))
}

/// Delete by `?id=`. Unknown ids succeed.
pub async fn delete<E, F, Fut>(
  noun: &str,
  params: IdParams,
  remove: F,
) -> Result<Json<Value>, ApiError>
where
  E: std::error::Error + Send + Sync + 'static,
  F: FnOnce(RecordId) -> Fut,
  Fut: Future<Output = Result<(), E>>,
{
  let id = params.require()?;
  remove(id).await.map_err(ApiError::store)?;
  tracing::info!(id, "{noun} deleted");
  Ok(Json(json!({ "success": true })))
}
