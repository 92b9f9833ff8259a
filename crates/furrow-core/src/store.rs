//! The `IrrigationStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `furrow-store-sqlite`).
//! Higher layers (`furrow-api`, the server binary) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  record::{ObservedRecord, PlannedRecord, SiteKey},
  remark::RemarkCategory,
};

/// Abstraction over an irrigation record store.
///
/// Both tables are upsert-by-natural-key: the last writer on a given
/// (valve, motor, date) wins. There is no versioning, optimistic locking, or
/// conflict detection beyond what the backend's atomic upsert provides.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IrrigationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Planned records ───────────────────────────────────────────────────

  /// Upsert a batch of planned records, overwriting crop and scheduled flow
  /// for existing keys. Returns the number of records applied. Re-applying
  /// the same batch is idempotent.
  fn upsert_planned(
    &self,
    records: Vec<PlannedRecord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Retrieve one planned record. Returns `None` if not found.
  fn get_planned<'a>(
    &'a self,
    key: &'a SiteKey,
  ) -> impl Future<Output = Result<Option<PlannedRecord>, Self::Error>> + Send + 'a;

  /// All planned records for a calendar date, ordered by valve then motor.
  fn planned_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<PlannedRecord>, Self::Error>> + Send + '_;

  // ── Observations ──────────────────────────────────────────────────────

  /// Upsert one observation, overwriting flow, remark, and photo reference
  /// for its key.
  fn upsert_observation(
    &self,
    record: ObservedRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve one observation. Returns `None` if not found.
  fn get_observation<'a>(
    &'a self,
    key: &'a SiteKey,
  ) -> impl Future<Output = Result<Option<ObservedRecord>, Self::Error>> + Send + 'a;

  /// All observations for a calendar date, ordered by valve then motor.
  fn observations_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<ObservedRecord>, Self::Error>> + Send + '_;

  /// All observations carrying a remark, newest first, optionally filtered
  /// by classified category.
  fn remarked(
    &self,
    category: Option<RemarkCategory>,
  ) -> impl Future<Output = Result<Vec<ObservedRecord>, Self::Error>> + Send + '_;
}
