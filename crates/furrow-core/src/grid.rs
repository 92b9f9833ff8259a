//! Daily status grid assembly for the dashboard.
//!
//! The grid is a pure read model: sorted valve rows by sorted motor columns,
//! one reconciled status per planned cell. It is computed per render, never
//! stored.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  record::{Flow, ObservedRecord, PlannedRecord},
  status::{Status, reconcile},
};

/// One dashboard row: a valve with one cell per motor column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
  pub valve: String,
  /// Aligned with [`StatusGrid::motors`]. `None` means no planned record
  /// exists for that (valve, motor) on the grid's date.
  pub cells: Vec<Option<Status>>,
}

/// The color-coded daily status grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGrid {
  pub date:   NaiveDate,
  pub motors: Vec<String>,
  pub rows:   Vec<GridRow>,
}

impl StatusGrid {
  /// Assemble the grid for one date from its planned and observed rows.
  ///
  /// Axes are the sorted distinct valves and motors of the planned rows.
  /// Lookups are keyed by the (valve, motor) pair, never by concatenated
  /// strings.
  pub fn build(
    date: NaiveDate,
    planned: &[PlannedRecord],
    observed: &[ObservedRecord],
  ) -> Self {
    let planned: Vec<&PlannedRecord> =
      planned.iter().filter(|p| p.key.date == date).collect();

    let planned_by_site: HashMap<(&str, &str), &PlannedRecord> = planned
      .iter()
      .map(|p| ((p.key.valve.as_str(), p.key.motor.as_str()), *p))
      .collect();
    let observed_flow: HashMap<(&str, &str), Flow> = observed
      .iter()
      .filter(|o| o.key.date == date)
      .map(|o| ((o.key.valve.as_str(), o.key.motor.as_str()), o.flow))
      .collect();

    let mut valves: Vec<String> =
      planned.iter().map(|p| p.key.valve.clone()).collect();
    valves.sort();
    valves.dedup();

    let mut motors: Vec<String> =
      planned.iter().map(|p| p.key.motor.clone()).collect();
    motors.sort();
    motors.dedup();

    let rows = valves
      .into_iter()
      .map(|valve| {
        let cells = motors
          .iter()
          .map(|motor| {
            let site = (valve.as_str(), motor.as_str());
            planned_by_site.get(&site).map(|p| {
              reconcile(p.crop, p.scheduled, observed_flow.get(&site).copied())
            })
          })
          .collect();
        GridRow { valve, cells }
      })
      .collect();

    Self { date, motors, rows }
  }
}
