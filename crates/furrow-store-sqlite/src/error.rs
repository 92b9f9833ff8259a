//! Error type for `furrow-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("unknown crop value: {0:?}")]
  UnknownCrop(String),

  #[error("unknown flow value: {0:?}")]
  UnknownFlow(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
