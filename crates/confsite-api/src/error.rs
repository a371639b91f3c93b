//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  /// Missing or wrong admin key on a protected route.
  #[error("Unauthorized Access")]
  Unauthorized,

  /// Wrong password on `POST /admin/login`.
  #[error("Invalid Credentials")]
  InvalidCredentials,

  #[error("{0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(e) => {
        // Detail stays in the log; clients get a generic message.
        tracing::error!(error = %e, "store failure");
        return (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "Internal Server Error" })),
        )
          .into_response();
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

impl From<confsite_core::Error> for ApiError {
  fn from(e: confsite_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}
