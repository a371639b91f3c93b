//! Admin-key extractor and standalone verifier.
//!
//! Protected routes take an [`Admin`] argument ahead of any body extractor, so
//! a request without the key is rejected before its body is read.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use confsite_core::store::SiteStore;

use crate::{AppState, error::ApiError};

/// Header carrying the shared admin secret.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// The deployment's admin secret.
#[derive(Clone)]
pub struct AdminAuth {
  secret: String,
}

impl AdminAuth {
  pub fn new(secret: impl Into<String>) -> Self { Self { secret: secret.into() } }

  /// Equality check against the configured secret. An empty secret accepts
  /// nothing.
  pub fn accepts(&self, candidate: &str) -> bool {
    !self.secret.is_empty() && candidate == self.secret
  }
}

/// Zero-size marker: present in the handler means the caller holds the key.
pub struct Admin;

/// Verify the admin key directly from headers.
pub fn verify_admin(headers: &HeaderMap, auth: &AdminAuth) -> Result<(), ApiError> {
  let key = headers
    .get(ADMIN_KEY_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  if !auth.accepts(key) {
    return Err(ApiError::Unauthorized);
  }
  Ok(())
}

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: SiteStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_admin(&parts.headers, &state.auth).inspect_err(|_| {
      tracing::warn!(method = %parts.method, uri = %parts.uri, "rejected admin request");
    })?;
    Ok(Admin)
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn headers(key: Option<&'static str>) -> HeaderMap {
    let mut h = HeaderMap::new();
    if let Some(key) = key {
      h.insert(ADMIN_KEY_HEADER, HeaderValue::from_static(key));
    }
    h
  }

  #[test]
  fn correct_key() {
    let auth = AdminAuth::new("secret");
    assert!(verify_admin(&headers(Some("secret")), &auth).is_ok());
  }

  #[test]
  fn wrong_key() {
    let auth = AdminAuth::new("secret");
    assert!(matches!(
      verify_admin(&headers(Some("guess")), &auth),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn missing_header() {
    let auth = AdminAuth::new("secret");
    assert!(matches!(
      verify_admin(&headers(None), &auth),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn empty_secret_rejects_everything() {
    let auth = AdminAuth::new("");
    assert!(!auth.accepts(""));
    assert!(verify_admin(&headers(Some("")), &auth).is_err());
  }
}
