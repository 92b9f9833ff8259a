//! Error types for `furrow-core`.

use thiserror::Error;

use crate::record::SiteKey;

#[derive(Debug, Error)]
pub enum Error {
  /// A remark was set without photo evidence. Surfaced to the supervisor as
  /// a validation failure; the save is blocked and can be retried.
  #[error("photo evidence is required when a remark is set for {0}")]
  PhotoRequired(SiteKey),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
