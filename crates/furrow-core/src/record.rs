//! Record types — the planned schedule rows and supervisor observations
//! tracked per valve, motor, and calendar date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, remark::Remark};

// ─── Key ─────────────────────────────────────────────────────────────────────

/// Composite natural key for all records.
///
/// Always carried as a struct, never as concatenated strings: valve "A1"
/// with motor "B" must not collide with valve "A" with motor "1B".
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SiteKey {
  pub valve: String,
  pub motor: String,
  pub date:  NaiveDate,
}

impl SiteKey {
  pub fn new(
    valve: impl Into<String>,
    motor: impl Into<String>,
    date: NaiveDate,
  ) -> Self {
    Self { valve: valve.into(), motor: motor.into(), date }
  }
}

impl fmt::Display for SiteKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "valve {} / motor {} on {}", self.valve, self.motor, self.date)
  }
}

// ─── Field enums ─────────────────────────────────────────────────────────────

/// Whether a plot carries a crop on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPresence {
  CropAvailable,
  NoCrop,
}

/// Whether water flowed, or was scheduled to flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
  Yes,
  No,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One normalized cell of an uploaded schedule sheet. Re-ingesting the same
/// key overwrites the prior values (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRecord {
  pub key:       SiteKey,
  pub crop:      CropPresence,
  pub scheduled: Flow,
}

/// Evidence photo stored on disk; no binary data lives in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
  /// Path relative to the configured photo directory.
  pub path:         String,
  /// SHA-256 hex digest of the photo bytes.
  pub content_hash: String,
  pub media_type:   String,
}

/// A supervisor's confirmation for one key. At most one per key; re-saving
/// overwrites flow, remark, and photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedRecord {
  pub key:    SiteKey,
  pub flow:   Flow,
  /// Composed remark text, e.g. "Pipe Leakage - dripping at the joint".
  /// Stored as free text; classification happens on read.
  pub remark: Option<String>,
  pub photo:  Option<PhotoRef>,
}

// ─── Submission input ────────────────────────────────────────────────────────

/// Photo bytes as received from the supervisor form, before persistence.
#[derive(Debug, Clone)]
pub struct NewPhoto {
  pub bytes:      Vec<u8>,
  pub media_type: String,
}

/// Input to a supervisor save.
///
/// Validation happens here, at submission time. The storage layer accepts
/// whatever it is handed, so partial writes are possible if it is bypassed.
#[derive(Debug, Clone)]
pub struct NewObservation {
  pub key:    SiteKey,
  pub flow:   Flow,
  pub remark: Option<Remark>,
  pub photo:  Option<NewPhoto>,
}

impl NewObservation {
  /// Enforce the mandatory-photo-with-remark invariant.
  pub fn validate(&self) -> Result<()> {
    if self.remark.is_some() && self.photo.is_none() {
      return Err(Error::PhotoRequired(self.key.clone()));
    }
    Ok(())
  }

  /// The remark as stored: composed free text.
  pub fn remark_text(&self) -> Option<String> {
    self.remark.as_ref().map(Remark::to_string)
  }
}
