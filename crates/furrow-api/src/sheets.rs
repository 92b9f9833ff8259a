//! Handler for `/sheets` — schedule sheet ingestion.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use furrow_core::{
  ingest::{self, Sheet},
  store::IrrigationStore,
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Response for a processed sheet.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
  /// Number of planned records upserted.
  pub records: usize,
}

/// `POST /sheets` — body: a decoded [`Sheet`].
///
/// Normalizes the grid and upserts one planned record per (row, date column)
/// pair. Columns with unparseable date headers contribute nothing; that is
/// not an error.
pub async fn upload<S>(
  State(state): State<AppState<S>>,
  Json(sheet): Json<Sheet>,
) -> Result<impl IntoResponse, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let records = ingest::normalize(&sheet);
  let applied = state
    .store
    .upsert_planned(records)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(UploadResponse { records: applied })))
}
