//! Sheet ingestion — normalizing an uploaded schedule grid into planned
//! records.
//!
//! Pipeline:
//!   Sheet (decoded grid, one per motor)
//!     └─ parse_date_label() per column header → keep parseable columns
//!          └─ normalize_crop() / flow_from_cell() per row
//!               └─ Vec<PlannedRecord>, one per (row, date column) pair

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{CropPresence, Flow, PlannedRecord, SiteKey};

// ─── Input grid ──────────────────────────────────────────────────────────────

/// An uploaded schedule grid for one motor, already decoded from its file
/// format. The first two columns are (valve, crop indicator); the remaining
/// column labels are candidate day-first dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
  pub motor:   String,
  /// Header labels, including the two leading non-date columns.
  pub columns: Vec<String>,
  /// Data rows, aligned with `columns`. Short rows are treated as having
  /// empty trailing cells.
  pub rows:    Vec<Vec<String>>,
}

// ─── Cell normalization ──────────────────────────────────────────────────────

/// Day-first formats tried in order; ISO accepted last.
const DATE_FORMATS: &[&str] = &[
  "%d-%m-%Y",
  "%d/%m/%Y",
  "%d.%m.%Y",
  "%d-%m-%y",
  "%d/%m/%y",
  "%Y-%m-%d",
];

/// Parse a column header as a day-first calendar date.
/// `None` for headers that are not dates (sheets routinely carry extra
/// columns); callers skip those silently.
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
  let label = label.trim();
  DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(label, format).ok())
}

/// Case-insensitive presence check. Intentionally crude: any cell containing
/// the substring "NO" anywhere ("NO", "None", "UNKNOWN") classifies as
/// no-crop.
pub fn normalize_crop(cell: &str) -> CropPresence {
  if cell.to_uppercase().contains("NO") {
    CropPresence::NoCrop
  } else {
    CropPresence::CropAvailable
  }
}

/// Any non-trivial scheduled time value counts as "flow scheduled".
pub fn flow_from_cell(cell: Option<&str>) -> Flow {
  match cell.map(str::trim) {
    None | Some("" | "-" | "0" | "00:00") => Flow::No,
    Some(_) => Flow::Yes,
  }
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Normalize a sheet into one planned record per (row, date column) pair.
///
/// No row-level validation: valve text passes through as-is, and missing
/// cells read as no scheduled flow. Normalizing the same sheet twice yields
/// the same record set.
pub fn normalize(sheet: &Sheet) -> Vec<PlannedRecord> {
  let date_columns: Vec<(usize, NaiveDate)> = sheet
    .columns
    .iter()
    .enumerate()
    .skip(2)
    .filter_map(|(index, label)| parse_date_label(label).map(|d| (index, d)))
    .collect();

  let mut records = Vec::with_capacity(sheet.rows.len() * date_columns.len());
  for row in &sheet.rows {
    let valve = row.first().map(String::as_str).unwrap_or_default();
    let crop = normalize_crop(row.get(1).map(String::as_str).unwrap_or_default());

    for &(column, date) in &date_columns {
      records.push(PlannedRecord {
        key:       SiteKey::new(valve, sheet.motor.clone(), date),
        crop,
        scheduled: flow_from_cell(row.get(column).map(String::as_str)),
      });
    }
  }
  records
}
