//! Offline cleaning of a raw spreadsheet export, and bulk loading of
//! cleaned rows into the ledger.
//!
//! Cleaning combines the separate date and time columns into one
//! datetime, drops the redundant raw columns, normalizes booleans to
//! 0/1, and reorders to the canonical column order. Malformed rows are
//! skipped with a warning rather than aborting the whole file.

use std::path::Path;

use anyhow::{Context, Result};
use securecheck_core::{
    record::{
        self, validate_vehicle_number, DriverGender, StopDuration, StopOutcome, StopRecord,
        MAX_DRIVER_AGE, NO_SEARCH,
    },
    store::LedgerStore,
};

/// Canonical column order of a cleaned row file.
pub const CLEAN_COLUMNS: &[&str] = &[
    "stop_datetime",
    "country_name",
    "driver_gender",
    "driver_age",
    "driver_race",
    "violation",
    "search_conducted",
    "search_type",
    "stop_outcome",
    "is_arrested",
    "stop_duration",
    "drugs_related_stop",
    "vehicle_number",
];

const BOOL_COLUMNS: &[&str] = &["search_conducted", "is_arrested", "drugs_related_stop"];

#[derive(Debug, Clone, Copy)]
pub struct CleanSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Normalize a raw export at `input` into the canonical row format at
/// `output`.
pub fn clean_export(input: &Path, output: &Path) -> Result<CleanSummary> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("cannot open {}", input.display()))?;
    let headers = reader.headers()?.clone();
    let position =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h == name) };

    let date_idx = position("stop_date").context("input is missing the stop_date column")?;
    let time_idx = position("stop_time").context("input is missing the stop_time column")?;
    // Every output column except the derived datetime must exist in the
    // input; the raw/* duplicates are simply never copied over.
    let mut sources: Vec<Option<usize>> = Vec::with_capacity(CLEAN_COLUMNS.len());
    for column in CLEAN_COLUMNS {
        if *column == "stop_datetime" {
            sources.push(None);
        } else {
            let idx = position(*column)
                .with_context(|| format!("input is missing the {column} column"))?;
            sources.push(Some(idx));
        }
    }

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("cannot create {}", output.display()))?;
    writer.write_record(CLEAN_COLUMNS)?;

    let mut rows_in = 0usize;
    let mut rows_out = 0usize;
    let mut skipped = 0usize;
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        rows_in += 1;

        let date = row.get(date_idx).unwrap_or_default();
        let time = row.get(time_idx).unwrap_or_default();
        let datetime = match record::parse_stop_datetime(date, time) {
            Ok(dt) => dt.format(record::DATETIME_FORMAT).to_string(),
            Err(err) => {
                log::warn!("row {}: {err}; skipped", line + 2);
                skipped += 1;
                continue;
            }
        };

        let mut out_row: Vec<String> = Vec::with_capacity(CLEAN_COLUMNS.len());
        let mut bad_bool = false;
        for (column, source) in CLEAN_COLUMNS.iter().zip(&sources) {
            let raw = match source {
                None => datetime.clone(),
                Some(idx) => row.get(*idx).unwrap_or_default().to_string(),
            };
            if BOOL_COLUMNS.contains(column) {
                match normalize_bool(&raw) {
                    Some(flag) => out_row.push(flag.to_string()),
                    None => {
                        log::warn!("row {}: unreadable {column} value '{raw}'; skipped", line + 2);
                        bad_bool = true;
                        break;
                    }
                }
            } else {
                out_row.push(raw);
            }
        }
        if bad_bool {
            skipped += 1;
            continue;
        }

        writer.write_record(&out_row)?;
        rows_out += 1;
    }
    writer.flush()?;

    log::info!("cleaned {rows_in} rows into {rows_out} ({skipped} skipped)");
    Ok(CleanSummary {
        rows_in,
        rows_out,
        skipped,
    })
}

/// Bulk-load a cleaned row file into the ledger. Rows go through the same
/// field validation as interactive logging, but no per-row prior-arrest
/// advisory is computed.
pub fn import_cleaned(store: &LedgerStore, input: &Path) -> Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("cannot open {}", input.display()))?;
    let headers = reader.headers()?.clone();
    let position = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("input is missing the {name} column"))
    };
    let columns = ColumnMap(
        CLEAN_COLUMNS
            .iter()
            .map(|c| position(*c))
            .collect::<Result<_>>()?,
    );

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        match parse_row(&columns, &row, line + 2) {
            Some(record) => {
                store.insert_stop(&record)?;
                inserted += 1;
            }
            None => skipped += 1,
        }
    }

    log::info!("imported {inserted} rows ({skipped} skipped)");
    Ok(ImportSummary { inserted, skipped })
}

/// Input-file index of each canonical column, aligned with CLEAN_COLUMNS.
struct ColumnMap(Vec<usize>);

impl ColumnMap {
    fn field<'a>(&self, row: &'a csv::StringRecord, column: &str) -> &'a str {
        CLEAN_COLUMNS
            .iter()
            .position(|c| c == &column)
            .and_then(|p| self.0.get(p).copied())
            .and_then(|i| row.get(i))
            .unwrap_or_default()
            .trim()
    }
}

fn parse_row(columns: &ColumnMap, row: &csv::StringRecord, line: usize) -> Option<StopRecord> {
    let skip = |what: &str, raw: &str| {
        log::warn!("row {line}: unreadable {what} '{raw}'; skipped");
        None::<StopRecord>
    };

    let raw_dt = columns.field(row, "stop_datetime");
    let stop_datetime = match record::parse_datetime_str(raw_dt) {
        Ok(dt) => dt,
        Err(_) => return skip("stop_datetime", raw_dt),
    };
    let raw_vehicle = columns.field(row, "vehicle_number");
    let vehicle_number = match validate_vehicle_number(raw_vehicle) {
        Ok(v) => v,
        Err(_) => return skip("vehicle_number", raw_vehicle),
    };
    let raw_age = columns.field(row, "driver_age");
    let driver_age = match raw_age.parse::<u32>() {
        Ok(age) if age <= MAX_DRIVER_AGE => age,
        _ => return skip("driver_age", raw_age),
    };
    let raw_duration = columns.field(row, "stop_duration");
    let stop_duration = match StopDuration::parse(raw_duration) {
        Some(d) => d,
        None => return skip("stop_duration", raw_duration),
    };
    let raw_outcome = columns.field(row, "stop_outcome");
    let stop_outcome = match StopOutcome::parse(raw_outcome) {
        Some(o) => o,
        None => return skip("stop_outcome", raw_outcome),
    };
    let mut bools = [false; 3];
    for (slot, column) in bools.iter_mut().zip(BOOL_COLUMNS) {
        let raw = columns.field(row, column);
        match normalize_bool(raw) {
            Some(flag) => *slot = flag == 1,
            None => return skip(column, raw),
        }
    }
    let [search_conducted, is_arrested, drugs_related_stop] = bools;

    let search_type = if search_conducted {
        columns.field(row, "search_type").to_string()
    } else {
        NO_SEARCH.to_string()
    };

    Some(StopRecord {
        stop_id: None,
        stop_datetime,
        country_name: columns.field(row, "country_name").to_string(),
        vehicle_number,
        driver_gender: DriverGender::parse_lenient(columns.field(row, "driver_gender")),
        driver_age,
        driver_race: columns.field(row, "driver_race").to_string(),
        violation: columns.field(row, "violation").to_string(),
        stop_duration,
        stop_outcome,
        search_conducted,
        search_type,
        is_arrested,
        drugs_related_stop,
    })
}

fn normalize_bool(raw: &str) -> Option<i64> {
    match raw.trim() {
        "1" | "true" | "True" | "TRUE" => Some(1),
        "0" | "false" | "False" | "FALSE" => Some(0),
        _ => None,
    }
}
