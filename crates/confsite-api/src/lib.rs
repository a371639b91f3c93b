//! JSON REST API for the conference site.
//!
//! Exposes an axum [`Router`] backed by any [`SiteStore`]. Reads are public;
//! mutations require the admin key (see [`auth`]). TLS and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", confsite_api::api_router(state))
//! ```

pub mod auth;
pub mod collection;
pub mod committee;
pub mod contacts;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fees;
pub mod login;
pub mod pages;
pub mod params;
pub mod settings;
pub mod speakers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use confsite_core::store::SiteStore;

pub use auth::AdminAuth;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: SiteStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AdminAuth>,
}

impl<S: SiteStore> AppState<S> {
  pub fn new(store: S, auth: AdminAuth) -> Self {
    Self { store: Arc::new(store), auth: Arc::new(auth) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SiteStore + Clone + 'static,
{
  Router::new()
    // Settings
    .route(
      "/settings",
      get(settings::get::<S>)
        .patch(settings::upsert::<S>)
        .put(settings::upsert::<S>),
    )
    // Speakers
    .route(
      "/speakers",
      get(speakers::list::<S>)
        .post(speakers::create::<S>)
        .patch(speakers::update::<S>)
        .put(speakers::update::<S>)
        .delete(speakers::delete::<S>),
    )
    .route(
      "/speakers/{id}",
      patch(speakers::update_by_path::<S>).put(speakers::update_by_path::<S>),
    )
    // Important dates
    .route(
      "/dates",
      get(dates::list::<S>)
        .post(dates::create::<S>)
        .patch(dates::update::<S>)
        .put(dates::update::<S>)
        .delete(dates::delete::<S>),
    )
    .route(
      "/dates/{id}",
      patch(dates::update_by_path::<S>).put(dates::update_by_path::<S>),
    )
    // Committee
    .route(
      "/committee",
      get(committee::list::<S>)
        .post(committee::create::<S>)
        .patch(committee::update::<S>)
        .put(committee::update::<S>)
        .delete(committee::delete::<S>),
    )
    .route(
      "/committee/{id}",
      patch(committee::update_by_path::<S>).put(committee::update_by_path::<S>),
    )
    // Registration fees
    .route(
      "/fees",
      get(fees::list::<S>)
        .post(fees::create::<S>)
        .patch(fees::update::<S>)
        .put(fees::update::<S>)
        .delete(fees::delete::<S>),
    )
    .route(
      "/fees/{id}",
      patch(fees::update_by_path::<S>).put(fees::update_by_path::<S>),
    )
    // Contacts
    .route(
      "/contacts",
      get(contacts::list::<S>)
        .post(contacts::create::<S>)
        .patch(contacts::update::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .route(
      "/contacts/{id}",
      patch(contacts::update_by_path::<S>).put(contacts::update_by_path::<S>),
    )
    // Pages
    .route("/pages", get(pages::list::<S>))
    .route(
      "/pages/{slug}",
      get(pages::get_one::<S>)
        .patch(pages::upsert::<S>)
        .put(pages::upsert::<S>),
    )
    // Admin
    .route("/admin/login", post(login::handler::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
