//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The ingestion path and the
//! report catalog call store methods — they never hold a connection.
//!
//! Every operation acquires its own scoped connection and releases it on
//! all exit paths. In-memory stores (tests) use a uniquely named
//! shared-cache URI plus an anchor connection held by the struct, so the
//! database outlives the per-operation connections.

use rusqlite::{params, Connection, OpenFlags, ToSql};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::LedgerResult,
    record::{StopRecord, DATETIME_FORMAT},
    rows::{TableResult, Value},
    types::StopId,
};

pub struct LedgerStore {
    path: String,
    // Keeps a shared in-memory database alive between scoped connections.
    _anchor: Option<Connection>,
}

/// One `PRAGMA table_info` row.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub notnull: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// Ledger-wide headline figures.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KpiSummary {
    pub total_stops: i64,
    pub total_arrests: i64,
    pub drug_stops: i64,
    pub drug_rate_pct: f64,
    pub unique_vehicles: i64,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let store = Self {
            path: path.to_string(),
            _anchor: None,
        };
        // Probe once so an unusable path fails here, not at first use.
        // WAL mode: better concurrent read behavior for file databases.
        let conn = store.connect()?;
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(store)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let path = format!(
            "file:securecheck_{}?mode=memory&cache=shared",
            Uuid::new_v4().simple()
        );
        let anchor = Connection::open_with_flags(&path, rw_flags())?;
        Ok(Self {
            path,
            _anchor: Some(anchor),
        })
    }

    fn connect(&self) -> LedgerResult<Connection> {
        Ok(Connection::open_with_flags(&self.path, rw_flags())?)
    }

    /// Scoped connection for the read-only surface. `query_only` makes
    /// any mutation attempt fail at the SQLite layer, for file and
    /// shared-memory stores alike.
    fn connect_read_only(&self) -> LedgerResult<Connection> {
        let conn = self.connect()?;
        conn.execute_batch("PRAGMA query_only=ON;")?;
        Ok(conn)
    }

    // ── Schema ─────────────────────────────────────────────────

    /// Create the ledger table if absent. Never alters an existing table.
    pub fn init_schema(&self) -> LedgerResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(include_str!("../../migrations/001_stop_records.sql"))?;
        Ok(())
    }

    /// Drop the ledger table and recreate it empty. Discards all rows;
    /// identities restart from 1.
    pub fn recreate(&self) -> LedgerResult<()> {
        {
            let conn = self.connect()?;
            conn.execute_batch("DROP TABLE IF EXISTS stop_records;")?;
        }
        log::warn!("stop_records dropped; all rows discarded");
        self.init_schema()
    }

    /// `PRAGMA table_info` introspection of the ledger table.
    pub fn table_info(&self) -> LedgerResult<Vec<ColumnInfo>> {
        let conn = self.connect_read_only()?;
        let mut stmt = conn.prepare("PRAGMA table_info(stop_records)")?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    cid: row.get(0)?,
                    name: row.get(1)?,
                    decl_type: row.get(2)?,
                    notnull: row.get::<_, i64>(3)? != 0,
                    default_value: row.get(4)?,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    // ── Writes ─────────────────────────────────────────────────

    /// Insert one stop record, returning the assigned identity.
    /// Booleans are persisted as the integers 0/1.
    pub fn insert_stop(&self, record: &StopRecord) -> LedgerResult<StopId> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO stop_records (
                stop_datetime, country_name, vehicle_number, driver_gender,
                driver_age, driver_race, violation, stop_duration, stop_outcome,
                search_conducted, search_type, is_arrested, drugs_related_stop
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                record.stop_datetime.format(DATETIME_FORMAT).to_string(),
                record.country_name,
                record.vehicle_number,
                record.driver_gender.as_str(),
                record.driver_age,
                record.driver_race,
                record.violation,
                record.stop_duration.as_str(),
                record.stop_outcome.as_str(),
                record.search_conducted as i64,
                record.search_type,
                record.is_arrested as i64,
                record.drugs_related_stop as i64,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Arbitrary read-only query over the ledger. Values are always bound
    /// as parameters, never concatenated into the SQL text.
    pub fn query(&self, sql: &str, params: &[&dyn ToSql]) -> LedgerResult<TableResult> {
        let conn = self.connect_read_only()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(Value::from_sql(row.get_ref(i)?));
            }
            out.push(cells);
        }
        Ok(TableResult { columns, rows: out })
    }

    /// Count of earlier records for this exact vehicle number that ended
    /// in an arrest.
    pub fn prior_arrest_count(&self, vehicle_number: &str) -> LedgerResult<i64> {
        let conn = self.connect_read_only()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM stop_records
             WHERE vehicle_number = ?1 AND is_arrested = 1",
            params![vehicle_number],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Full rows for one vehicle, newest first.
    pub fn vehicle_history(&self, vehicle_number: &str, limit: u32) -> LedgerResult<TableResult> {
        self.query(
            "SELECT * FROM stop_records
             WHERE vehicle_number = ?1
             ORDER BY stop_datetime DESC LIMIT ?2",
            &[&vehicle_number, &limit],
        )
    }

    pub fn stop_count(&self) -> LedgerResult<i64> {
        let conn = self.connect_read_only()?;
        let count = conn.query_row("SELECT COUNT(*) FROM stop_records", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn kpi_summary(&self) -> LedgerResult<KpiSummary> {
        let conn = self.connect_read_only()?;
        let (total_stops, total_arrests, drug_stops): (i64, i64, i64) = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN drugs_related_stop = 1 THEN 1 ELSE 0 END), 0)
             FROM stop_records",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let unique_vehicles: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT vehicle_number) FROM stop_records",
            [],
            |row| row.get(0),
        )?;
        let drug_rate_pct = if total_stops > 0 {
            drug_stops as f64 * 100.0 / total_stops as f64
        } else {
            0.0
        };
        Ok(KpiSummary {
            total_stops,
            total_arrests,
            drug_stops,
            drug_rate_pct,
            unique_vehicles,
        })
    }
}

fn rw_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE | OpenFlags::SQLITE_OPEN_URI
}
