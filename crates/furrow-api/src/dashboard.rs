//! Handlers for the dashboard endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/grid` | `?date=` required; the assembled status grid |
//! | `GET`  | `/remarks` | Optional `?category=`; history, newest first |
//! | `GET`  | `/remarks/counts` | Per-category remark counts |

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use furrow_core::{
  grid::StatusGrid,
  remark::{RemarkCategory, category_counts},
  store::IrrigationStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Grid ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GridParams {
  pub date: NaiveDate,
}

/// `GET /grid?date=<yyyy-mm-dd>`
pub async fn grid<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GridParams>,
) -> Result<Json<StatusGrid>, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let planned = state
    .store
    .planned_on(params.date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let observed = state
    .store
    .observations_on(params.date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(StatusGrid::build(params.date, &planned, &observed)))
}

// ─── Remark history ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct RemarkParams {
  /// Restrict to one classified category, e.g. `pipe_leakage`.
  pub category: Option<RemarkCategory>,
}

/// One remark history entry.
#[derive(Debug, Serialize)]
pub struct RemarkEntry {
  pub date:   NaiveDate,
  pub valve:  String,
  pub motor:  String,
  pub remark: String,
}

/// `GET /remarks[?category=pipe_leakage|extra|other]`
pub async fn remarks<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<RemarkParams>,
) -> Result<Json<Vec<RemarkEntry>>, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let rows = state
    .store
    .remarked(params.category)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let entries = rows
    .into_iter()
    .filter_map(|r| {
      r.remark.map(|remark| RemarkEntry {
        date:  r.key.date,
        valve: r.key.valve,
        motor: r.key.motor,
        remark,
      })
    })
    .collect();

  Ok(Json(entries))
}

/// `GET /remarks/counts` — unclassifiable remark text counts toward nothing.
pub async fn remark_counts<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<RemarkCategory, usize>>, ApiError>
where
  S: IrrigationStore + Clone + Send + Sync + 'static,
{
  let rows = state
    .store
    .remarked(None)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let counts = category_counts(rows.iter().filter_map(|r| r.remark.as_deref()));
  Ok(Json(counts))
}
