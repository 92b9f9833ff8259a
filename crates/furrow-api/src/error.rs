//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Submission failed validation; the caller can correct and retry.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("photo write failed: {0}")]
  Photo(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Photo(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
