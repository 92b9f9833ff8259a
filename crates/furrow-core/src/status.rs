//! The status reconciliation engine.
//!
//! One pure function folds a planned record and an optional observed flow
//! into the single categorical status a dashboard cell renders.

use serde::{Deserialize, Serialize};

use crate::record::{CropPresence, Flow};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The outcome of reconciling planned against observed for one key.
///
/// The table is deliberately asymmetric: only pending work and exceptions
/// are surfaced. A no-crop plot nobody touched, or an unscheduled valve with
/// no observed flow, reports [`Status::None`] rather than an "all clear"
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
  /// Nothing to report.
  None,
  /// Scheduled flow on a cropped plot, awaiting supervisor confirmation.
  Pending,
  /// Scheduled flow confirmed by the supervisor.
  Irrigated,
  /// Flow recorded despite no schedule; investigable.
  UnscheduledFlow,
  /// Flow recorded on a plot with no crop; the highest-severity flag.
  NoCropFlow,
}

impl Status {
  /// Dashboard color, if the status renders at all.
  pub fn color(self) -> Option<&'static str> {
    match self {
      Self::None => None,
      Self::Pending => Some("yellow"),
      Self::Irrigated => Some("green"),
      Self::UnscheduledFlow => Some("blue"),
      Self::NoCropFlow => Some("red"),
    }
  }
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// Reconcile one planned record with an optional observed flow.
///
/// First match wins:
/// 1. crop available, scheduled, nothing observed → `Pending`
/// 2. nothing observed otherwise                  → `None`
/// 3. crop available, scheduled, observed flow    → `Irrigated`
/// 4. crop available, unscheduled, observed flow  → `UnscheduledFlow`
/// 5. no crop, observed flow (either schedule)    → `NoCropFlow`
/// 6. otherwise                                   → `None`
pub fn reconcile(
  crop: CropPresence,
  scheduled: Flow,
  observed: Option<Flow>,
) -> Status {
  let Some(actual) = observed else {
    return if crop == CropPresence::CropAvailable && scheduled == Flow::Yes {
      Status::Pending
    } else {
      Status::None
    };
  };

  match (crop, scheduled, actual) {
    (CropPresence::CropAvailable, Flow::Yes, Flow::Yes) => Status::Irrigated,
    (CropPresence::CropAvailable, Flow::No, Flow::Yes) => Status::UnscheduledFlow,
    (CropPresence::NoCrop, _, Flow::Yes) => Status::NoCropFlow,
    _ => Status::None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{
    CropPresence::{CropAvailable, NoCrop},
    Flow::{No, Yes},
  };

  // The input domain is two booleans by one optional boolean; every one of
  // the twelve combinations is pinned here.

  #[test]
  fn nothing_observed() {
    assert_eq!(reconcile(CropAvailable, Yes, None), Status::Pending);
    assert_eq!(reconcile(CropAvailable, No, None), Status::None);
    assert_eq!(reconcile(NoCrop, Yes, None), Status::None);
    assert_eq!(reconcile(NoCrop, No, None), Status::None);
  }

  #[test]
  fn observed_flow() {
    assert_eq!(reconcile(CropAvailable, Yes, Some(Yes)), Status::Irrigated);
    assert_eq!(reconcile(CropAvailable, No, Some(Yes)), Status::UnscheduledFlow);
    // No-crop flow flags regardless of what was scheduled.
    assert_eq!(reconcile(NoCrop, Yes, Some(Yes)), Status::NoCropFlow);
    assert_eq!(reconcile(NoCrop, No, Some(Yes)), Status::NoCropFlow);
  }

  #[test]
  fn observed_no_flow_never_surfaces() {
    assert_eq!(reconcile(CropAvailable, Yes, Some(No)), Status::None);
    assert_eq!(reconcile(CropAvailable, No, Some(No)), Status::None);
    assert_eq!(reconcile(NoCrop, Yes, Some(No)), Status::None);
    assert_eq!(reconcile(NoCrop, No, Some(No)), Status::None);
  }

  #[test]
  fn colors_follow_severity() {
    assert_eq!(Status::None.color(), None);
    assert_eq!(Status::Pending.color(), Some("yellow"));
    assert_eq!(Status::Irrigated.color(), Some("green"));
    assert_eq!(Status::UnscheduledFlow.color(), Some("blue"));
    assert_eq!(Status::NoCropFlow.color(), Some("red"));
  }
}
