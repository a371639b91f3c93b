//! Extractors whose rejections use the [`ApiError`] body shape.
//!
//! Axum's stock `Json`, `Path` and `Query` reject with plain-text bodies and,
//! for JSON that parses but does not fit the payload type, a 422. These
//! wrappers turn every such rejection into a 400 `{"error": …}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
