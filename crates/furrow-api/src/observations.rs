//! Handlers for the supervisor entry endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/worklist` | `?date=` required; crop-available planned rows |
//! | `GET`  | `/observations` | `?date=` required |
//! | `POST` | `/observations` | Body: [`ObservationBody`]; returns 201 + stored record |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::NaiveDate;
use furrow_core::{
  record::{
    CropPresence, Flow, NewObservation, NewPhoto, ObservedRecord,
    PlannedRecord, SiteKey,
  },
  remark::{Remark, RemarkCategory},
  store::IrrigationStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── Worklist ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateParams {
  pub date: NaiveDate,
}

/// `GET /worklist?date=<yyyy-mm-dd>`
///
/// The planned rows a supervisor is asked to confirm: crop-available sites
/// for the date. No-crop rows are not part of the entry form.
pub async fn worklist<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<DateParams>,
) -> Result<Json<Vec<PlannedRecord>>, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let mut rows = state
    .store
    .planned_on(params.date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  rows.retain(|r| r.crop == CropPresence::CropAvailable);
  Ok(Json(rows))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /observations?date=<yyyy-mm-dd>`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<DateParams>,
) -> Result<Json<Vec<ObservedRecord>>, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let rows = state
    .store
    .observations_on(params.date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Base64-encoded photo evidence.
#[derive(Debug, Deserialize)]
pub struct PhotoBody {
  pub media_type: String,
  pub data:       String,
}

/// JSON body accepted by `POST /observations`.
#[derive(Debug, Deserialize)]
pub struct ObservationBody {
  pub valve:           String,
  pub motor:           String,
  pub date:            NaiveDate,
  pub flow:            Flow,
  pub remark_category: Option<RemarkCategory>,
  pub remark_detail:   Option<String>,
  pub photo:           Option<PhotoBody>,
}

/// `POST /observations` — returns 201 + the stored record.
///
/// A remark without photo evidence is rejected before anything is written.
/// The photo write happens first; if it fails, the whole save fails and the
/// record is untouched.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ObservationBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let photo = body.photo.map(decode_photo).transpose()?;
  let input = NewObservation {
    key:    SiteKey::new(body.valve, body.motor, body.date),
    flow:   body.flow,
    remark: body
      .remark_category
      .map(|category| Remark::new(category, body.remark_detail)),
    photo,
  };

  input
    .validate()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let photo_ref = match &input.photo {
    Some(photo) => Some(state.photos.save(photo).await?),
    None => None,
  };

  let record = ObservedRecord {
    key:    input.key.clone(),
    flow:   input.flow,
    remark: input.remark_text(),
    photo:  photo_ref,
  };
  state
    .store
    .upsert_observation(record.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(record)))
}

fn decode_photo(body: PhotoBody) -> Result<NewPhoto, ApiError> {
  let bytes = B64
    .decode(body.data.as_bytes())
    .map_err(|e| ApiError::BadRequest(format!("invalid photo encoding: {e}")))?;
  Ok(NewPhoto { bytes, media_type: body.media_type })
}
