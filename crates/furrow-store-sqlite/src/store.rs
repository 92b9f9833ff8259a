//! [`SqliteStore`] — the SQLite implementation of [`IrrigationStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use furrow_core::{
  record::{ObservedRecord, PlannedRecord, SiteKey},
  remark::RemarkCategory,
  store::IrrigationStore,
};

use crate::{
  Error, Result,
  encode::{
    RawObservation, RawPlanned, encode_crop, encode_date, encode_flow,
    encode_photo,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An irrigation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── IrrigationStore impl ────────────────────────────────────────────────────

impl IrrigationStore for SqliteStore {
  type Error = Error;

  // ── Planned records ───────────────────────────────────────────────────────

  async fn upsert_planned(&self, records: Vec<PlannedRecord>) -> Result<usize> {
    let rows: Vec<(String, String, String, String, String)> = records
      .into_iter()
      .map(|r| {
        (
          r.key.valve,
          r.key.motor,
          encode_crop(r.crop).to_owned(),
          encode_flow(r.scheduled).to_owned(),
          encode_date(r.key.date),
        )
      })
      .collect();

    let count = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO excel_data (valve, motor, crop, excel_flow, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (valve, motor, date)
             DO UPDATE SET crop = excluded.crop,
                           excel_flow = excluded.excel_flow",
          )?;
          for (valve, motor, crop, flow, date) in &rows {
            stmt.execute(rusqlite::params![valve, motor, crop, flow, date])?;
          }
        }
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    Ok(count)
  }

  async fn get_planned(&self, key: &SiteKey) -> Result<Option<PlannedRecord>> {
    let valve = key.valve.clone();
    let motor = key.motor.clone();
    let date = encode_date(key.date);

    let raw: Option<RawPlanned> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT valve, motor, crop, excel_flow, date
               FROM excel_data
               WHERE valve = ?1 AND motor = ?2 AND date = ?3",
              rusqlite::params![valve, motor, date],
              |row| {
                Ok(RawPlanned {
                  valve: row.get(0)?,
                  motor: row.get(1)?,
                  crop:  row.get(2)?,
                  flow:  row.get(3)?,
                  date:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPlanned::into_planned).transpose()
  }

  async fn planned_on(&self, date: NaiveDate) -> Result<Vec<PlannedRecord>> {
    let date_str = encode_date(date);

    let raws: Vec<RawPlanned> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT valve, motor, crop, excel_flow, date
           FROM excel_data
           WHERE date = ?1
           ORDER BY valve, motor",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok(RawPlanned {
              valve: row.get(0)?,
              motor: row.get(1)?,
              crop:  row.get(2)?,
              flow:  row.get(3)?,
              date:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlanned::into_planned).collect()
  }

  // ── Observations ──────────────────────────────────────────────────────────

  async fn upsert_observation(&self, record: ObservedRecord) -> Result<()> {
    let valve = record.key.valve;
    let motor = record.key.motor;
    let date = encode_date(record.key.date);
    let flow = encode_flow(record.flow).to_owned();
    let remark = record.remark;
    let photo = record.photo.as_ref().map(encode_photo).transpose()?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO supervisor_data
             (valve, motor, date, supervisor_flow, remarks, photo)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (valve, motor, date)
           DO UPDATE SET supervisor_flow = excluded.supervisor_flow,
                         remarks = excluded.remarks,
                         photo = excluded.photo",
          rusqlite::params![valve, motor, date, flow, remark, photo],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get_observation(&self, key: &SiteKey) -> Result<Option<ObservedRecord>> {
    let valve = key.valve.clone();
    let motor = key.motor.clone();
    let date = encode_date(key.date);

    let raw: Option<RawObservation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT valve, motor, date, supervisor_flow, remarks, photo
               FROM supervisor_data
               WHERE valve = ?1 AND motor = ?2 AND date = ?3",
              rusqlite::params![valve, motor, date],
              |row| {
                Ok(RawObservation {
                  valve:  row.get(0)?,
                  motor:  row.get(1)?,
                  date:   row.get(2)?,
                  flow:   row.get(3)?,
                  remark: row.get(4)?,
                  photo:  row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawObservation::into_observation).transpose()
  }

  async fn observations_on(&self, date: NaiveDate) -> Result<Vec<ObservedRecord>> {
    let date_str = encode_date(date);

    let raws: Vec<RawObservation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT valve, motor, date, supervisor_flow, remarks, photo
           FROM supervisor_data
           WHERE date = ?1
           ORDER BY valve, motor",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok(RawObservation {
              valve:  row.get(0)?,
              motor:  row.get(1)?,
              date:   row.get(2)?,
              flow:   row.get(3)?,
              remark: row.get(4)?,
              photo:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawObservation::into_observation)
      .collect()
  }

  async fn remarked(
    &self,
    category: Option<RemarkCategory>,
  ) -> Result<Vec<ObservedRecord>> {
    let raws: Vec<RawObservation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT valve, motor, date, supervisor_flow, remarks, photo
           FROM supervisor_data
           WHERE remarks IS NOT NULL AND remarks != ''
           ORDER BY date DESC, valve, motor",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawObservation {
              valve:  row.get(0)?,
              motor:  row.get(1)?,
              date:   row.get(2)?,
              flow:   row.get(3)?,
              remark: row.get(4)?,
              photo:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut records: Vec<ObservedRecord> = raws
      .into_iter()
      .map(RawObservation::into_observation)
      .collect::<Result<_>>()?;

    if let Some(category) = category {
      records.retain(|r| {
        r.remark
          .as_deref()
          .and_then(RemarkCategory::classify)
          .is_some_and(|c| c == category)
      });
    }

    Ok(records)
  }
}
