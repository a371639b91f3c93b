//! Handlers for `/pages`: rich-text content pages keyed by slug.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/pages` | All pages, by slug |
//! | `GET`  | `/pages/:slug` | Empty title/content when the page does not exist yet |
//! | `PATCH`/`PUT` | `/pages/:slug` | Admin; body: [`PagePatch`]; upsert |

use axum::{
  Json,
  extract::State,
  response::{IntoResponse, Response},
};
use confsite_core::{
  page::{Page, PagePatch},
  store::SiteStore,
  validate::{Validate, validate_slug},
};
use serde_json::json;

use crate::{
  AppState,
  auth::Admin,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `GET /pages`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Page>>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  let pages = state.store.list_pages().await.map_err(ApiError::store)?;
  Ok(Json(pages))
}

/// `GET /pages/:slug`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  ApiPath(slug): ApiPath<String>,
) -> Result<Response, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  validate_slug(&slug)?;
  let page = state.store.get_page(&slug).await.map_err(ApiError::store)?;
  Ok(match page {
    Some(page) => Json(page).into_response(),
    None => Json(json!({ "slug": slug, "title": "", "content": "" })).into_response(),
  })
}

/// `PATCH /pages/:slug`: creates the page on first write.
pub async fn upsert<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiPath(slug): ApiPath<String>,
  ApiJson(patch): ApiJson<PagePatch>,
) -> Result<Json<Page>, ApiError>
where
  S: SiteStore + Clone + 'static,
{
  validate_slug(&slug)?;
  patch.validate()?;
  let page = state
    .store
    .upsert_page(slug, patch)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(slug = %page.slug, "page updated");
  Ok(Json(page))
}
