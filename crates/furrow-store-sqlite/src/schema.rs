//! SQL schema for the Furrow SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Written only by sheet ingestion. Rows are overwritten in place on
-- re-ingestion of the same key.
CREATE TABLE IF NOT EXISTS excel_data (
    valve       TEXT NOT NULL,
    motor       TEXT NOT NULL,
    crop        TEXT NOT NULL,   -- 'CROP AVAILABLE' | 'NO CROP'
    excel_flow  TEXT NOT NULL,   -- 'YES' | 'NO'
    date        TEXT NOT NULL,   -- ISO 8601 calendar date
    PRIMARY KEY (valve, motor, date)
);

-- Written only by supervisor saves. At most one row per key.
CREATE TABLE IF NOT EXISTS supervisor_data (
    valve           TEXT NOT NULL,
    motor           TEXT NOT NULL,
    date            TEXT NOT NULL,   -- ISO 8601 calendar date
    supervisor_flow TEXT NOT NULL,   -- 'YES' | 'NO'
    remarks         TEXT,            -- composed free text, NULL when absent
    photo           TEXT,            -- JSON-encoded photo reference or NULL
    PRIMARY KEY (valve, motor, date)
);

CREATE INDEX IF NOT EXISTS excel_data_date_idx      ON excel_data(date);
CREATE INDEX IF NOT EXISTS supervisor_data_date_idx ON supervisor_data(date);

PRAGMA user_version = 1;
";
