//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 calendar dates. Crop and flow columns use
//! the uppercase tokens the upstream sheets carry. The photo reference is
//! stored as compact JSON.

use chrono::NaiveDate;
use furrow_core::record::{
  CropPresence, Flow, ObservedRecord, PhotoRef, PlannedRecord, SiteKey,
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── CropPresence ────────────────────────────────────────────────────────────

pub fn encode_crop(crop: CropPresence) -> &'static str {
  match crop {
    CropPresence::CropAvailable => "CROP AVAILABLE",
    CropPresence::NoCrop => "NO CROP",
  }
}

pub fn decode_crop(s: &str) -> Result<CropPresence> {
  match s {
    "CROP AVAILABLE" => Ok(CropPresence::CropAvailable),
    "NO CROP" => Ok(CropPresence::NoCrop),
    other => Err(Error::UnknownCrop(other.to_owned())),
  }
}

// ─── Flow ────────────────────────────────────────────────────────────────────

pub fn encode_flow(flow: Flow) -> &'static str {
  match flow {
    Flow::Yes => "YES",
    Flow::No => "NO",
  }
}

pub fn decode_flow(s: &str) -> Result<Flow> {
  match s {
    "YES" => Ok(Flow::Yes),
    "NO" => Ok(Flow::No),
    other => Err(Error::UnknownFlow(other.to_owned())),
  }
}

// ─── PhotoRef ────────────────────────────────────────────────────────────────

pub fn encode_photo(photo: &PhotoRef) -> Result<String> {
  Ok(serde_json::to_string(photo)?)
}

pub fn decode_photo(s: &str) -> Result<PhotoRef> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `excel_data` row.
pub struct RawPlanned {
  pub valve: String,
  pub motor: String,
  pub crop:  String,
  pub flow:  String,
  pub date:  String,
}

impl RawPlanned {
  pub fn into_planned(self) -> Result<PlannedRecord> {
    Ok(PlannedRecord {
      key:       SiteKey {
        valve: self.valve,
        motor: self.motor,
        date:  decode_date(&self.date)?,
      },
      crop:      decode_crop(&self.crop)?,
      scheduled: decode_flow(&self.flow)?,
    })
  }
}

/// Raw strings read directly from a `supervisor_data` row.
pub struct RawObservation {
  pub valve:  String,
  pub motor:  String,
  pub date:   String,
  pub flow:   String,
  pub remark: Option<String>,
  pub photo:  Option<String>,
}

impl RawObservation {
  pub fn into_observation(self) -> Result<ObservedRecord> {
    Ok(ObservedRecord {
      key:    SiteKey {
        valve: self.valve,
        motor: self.motor,
        date:  decode_date(&self.date)?,
      },
      flow:   decode_flow(&self.flow)?,
      remark: self.remark.filter(|r| !r.is_empty()),
      photo:  self.photo.as_deref().map(decode_photo).transpose()?,
    })
  }
}
