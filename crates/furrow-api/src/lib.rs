//! JSON REST API for Furrow.
//!
//! Exposes an axum [`Router`] backed by any
//! [`furrow_core::store::IrrigationStore`]. Transport concerns (TLS, trace
//! layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! furrow_api::api_router(AppState { store, photos })
//! ```

pub mod dashboard;
pub mod error;
pub mod observations;
pub mod photos;
pub mod sheets;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use furrow_core::store::IrrigationStore;

pub use error::ApiError;
pub use photos::PhotoStore;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub photos: Arc<PhotoStore>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Ingestion
    .route("/sheets", post(sheets::upload::<S>))
    // Supervisor entry
    .route("/worklist", get(observations::worklist::<S>))
    .route(
      "/observations",
      get(observations::list::<S>).post(observations::create::<S>),
    )
    // Dashboard
    .route("/grid", get(dashboard::grid::<S>))
    .route("/remarks", get(dashboard::remarks::<S>))
    .route("/remarks/counts", get(dashboard::remark_counts::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use std::sync::atomic::{AtomicUsize, Ordering};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use furrow_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  static PHOTO_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let photo_dir = std::env::temp_dir().join(format!(
      "furrow-api-test-{}-{}",
      std::process::id(),
      PHOTO_DIR_SEQ.fetch_add(1, Ordering::Relaxed),
    ));
    AppState {
      store:  Arc::new(store),
      photos: Arc::new(PhotoStore::new(photo_dir).unwrap()),
    }
  }

  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };

    let resp = api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn sample_sheet() -> Value {
    json!({
      "motor": "M1",
      "columns": ["Valve", "Crop", "01-06-2024"],
      "rows": [
        ["V1", "Wheat", "06:00"],
        ["V2", "None", "-"],
      ],
    })
  }

  // ── Upload + grid ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn uploaded_sheet_shows_pending_then_irrigated() {
    let state = make_state().await;

    let (status, body) =
      send(state.clone(), "POST", "/sheets", Some(sample_sheet())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["records"], 2);

    let (status, grid) =
      send(state.clone(), "GET", "/grid?date=2024-06-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid["motors"], json!(["M1"]));
    assert_eq!(grid["rows"][0]["valve"], "V1");
    assert_eq!(grid["rows"][0]["cells"][0], "pending");
    // No-crop valve with nothing observed surfaces nothing.
    assert_eq!(grid["rows"][1]["cells"][0], "none");

    let (status, _) = send(
      state.clone(),
      "POST",
      "/observations",
      Some(json!({
        "valve": "V1",
        "motor": "M1",
        "date": "2024-06-01",
        "flow": "yes",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, grid) = send(state, "GET", "/grid?date=2024-06-01", None).await;
    assert_eq!(grid["rows"][0]["cells"][0], "irrigated");
  }

  #[tokio::test]
  async fn worklist_lists_only_crop_available_rows() {
    let state = make_state().await;
    send(state.clone(), "POST", "/sheets", Some(sample_sheet())).await;

    let (status, rows) =
      send(state, "GET", "/worklist?date=2024-06-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["key"]["valve"], "V1");
  }

  // ── Observation validation ──────────────────────────────────────────────────

  #[tokio::test]
  async fn remark_without_photo_is_rejected_and_nothing_is_written() {
    let state = make_state().await;
    send(state.clone(), "POST", "/sheets", Some(sample_sheet())).await;

    let (status, body) = send(
      state.clone(),
      "POST",
      "/observations",
      Some(json!({
        "valve": "V1",
        "motor": "M1",
        "date": "2024-06-01",
        "flow": "yes",
        "remark_category": "pipe_leakage",
        "remark_detail": "joint 3",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("photo"));

    let (_, rows) =
      send(state, "GET", "/observations?date=2024-06-01", None).await;
    assert_eq!(rows, json!([]));
  }

  #[tokio::test]
  async fn undecodable_photo_data_is_a_bad_request() {
    let state = make_state().await;

    let (status, _) = send(
      state,
      "POST",
      "/observations",
      Some(json!({
        "valve": "V1",
        "motor": "M1",
        "date": "2024-06-01",
        "flow": "yes",
        "remark_category": "extra",
        "photo": { "media_type": "image/jpeg", "data": "%%%not-base64%%%" },
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Remark history ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn remark_with_photo_persists_and_is_counted() {
    let state = make_state().await;

    let (status, saved) = send(
      state.clone(),
      "POST",
      "/observations",
      Some(json!({
        "valve": "V1",
        "motor": "M1",
        "date": "2024-06-01",
        "flow": "yes",
        "remark_category": "pipe_leakage",
        "remark_detail": "joint 3",
        "photo": {
          "media_type": "image/jpeg",
          "data": B64.encode([0xFF, 0xD8, 0xFF]),
        },
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["remark"], "Pipe Leakage - joint 3");
    assert!(saved["photo"]["content_hash"].as_str().unwrap().len() == 64);

    let (_, history) = send(state.clone(), "GET", "/remarks", None).await;
    assert_eq!(history[0]["remark"], "Pipe Leakage - joint 3");

    let (_, filtered) =
      send(state.clone(), "GET", "/remarks?category=extra", None).await;
    assert_eq!(filtered, json!([]));

    let (_, counts) = send(state, "GET", "/remarks/counts", None).await;
    assert_eq!(counts, json!({ "pipe_leakage": 1 }));
  }
}
