//! Remark categories and classification.
//!
//! Remarks are stored as composed free text (`"<category> - <detail>"` or a
//! bare `"<category>"`). Classification recovers the leading category token
//! by prefix match; text with no recognizable category is simply excluded
//! from aggregates, it is not an error.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

// ─── Category ────────────────────────────────────────────────────────────────

/// The fixed set of incident categories a supervisor can file under.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RemarkCategory {
  PipeLeakage,
  Extra,
  Other,
}

impl RemarkCategory {
  pub const ALL: [RemarkCategory; 3] =
    [Self::PipeLeakage, Self::Extra, Self::Other];

  /// The label used in composed remark text.
  pub fn label(self) -> &'static str {
    match self {
      Self::PipeLeakage => "Pipe Leakage",
      Self::Extra => "Extra",
      Self::Other => "Other",
    }
  }

  /// Recover the category from stored remark text by prefix match.
  pub fn classify(text: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| text.starts_with(c.label()))
  }
}

impl fmt::Display for RemarkCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Remark ──────────────────────────────────────────────────────────────────

/// A category plus optional free-text detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remark {
  pub category: RemarkCategory,
  pub detail:   Option<String>,
}

impl Remark {
  /// Empty or whitespace-only detail is treated as absent.
  pub fn new(category: RemarkCategory, detail: Option<String>) -> Self {
    let detail = detail.filter(|d| !d.trim().is_empty());
    Self { category, detail }
  }
}

impl fmt::Display for Remark {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.detail {
      Some(detail) => write!(f, "{} - {}", self.category.label(), detail),
      None => f.write_str(self.category.label()),
    }
  }
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Count classified remarks per category. Unclassifiable text contributes to
/// no bucket.
pub fn category_counts<'a, I>(remarks: I) -> BTreeMap<RemarkCategory, usize>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut counts = BTreeMap::new();
  for text in remarks {
    if let Some(category) = RemarkCategory::classify(text) {
      *counts.entry(category).or_insert(0) += 1;
    }
  }
  counts
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn composes_with_and_without_detail() {
    let with = Remark::new(RemarkCategory::PipeLeakage, Some("joint 3".into()));
    assert_eq!(with.to_string(), "Pipe Leakage - joint 3");

    let bare = Remark::new(RemarkCategory::Extra, None);
    assert_eq!(bare.to_string(), "Extra");

    let blank_detail = Remark::new(RemarkCategory::Other, Some("   ".into()));
    assert_eq!(blank_detail.to_string(), "Other");
  }

  #[test]
  fn classify_matches_leading_category() {
    assert_eq!(
      RemarkCategory::classify("Pipe Leakage - near the pump"),
      Some(RemarkCategory::PipeLeakage)
    );
    assert_eq!(RemarkCategory::classify("Extra"), Some(RemarkCategory::Extra));
    assert_eq!(
      RemarkCategory::classify("Other - trampled border"),
      Some(RemarkCategory::Other)
    );
  }

  #[test]
  fn classify_rejects_unknown_text() {
    assert_eq!(RemarkCategory::classify("flooded channel"), None);
    assert_eq!(RemarkCategory::classify(""), None);
    // Prefix match is case-sensitive, matching the composed form exactly.
    assert_eq!(RemarkCategory::classify("pipe leakage"), None);
  }

  #[test]
  fn counts_skip_unclassifiable_remarks() {
    let remarks = [
      "Pipe Leakage - joint 3",
      "Pipe Leakage",
      "Extra - manual top-up",
      "scribbled note",
    ];
    let counts = category_counts(remarks);
    assert_eq!(counts.get(&RemarkCategory::PipeLeakage), Some(&2));
    assert_eq!(counts.get(&RemarkCategory::Extra), Some(&1));
    assert_eq!(counts.get(&RemarkCategory::Other), None);
  }
}
