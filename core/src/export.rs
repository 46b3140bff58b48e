//! Render result sets as delimited text or JSON.
//!
//! Column order and row order are preserved exactly as returned; no
//! re-sorting or re-aggregation happens here.

use std::io::Write;

use crate::{
    error::{LedgerError, LedgerResult},
    rows::{TableResult, Value},
};

/// Write `result` as CSV: one header row, then one line per result row.
/// NULL renders as an empty field.
pub fn write_csv<W: Write>(result: &TableResult, out: W) -> LedgerResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&result.columns)?;
    for row in &result.rows {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(result: &TableResult) -> LedgerResult<String> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LedgerError::Other(e.into()))
}

/// JSON array of column-keyed objects, one per row.
pub fn to_json(result: &TableResult) -> LedgerResult<String> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = result
        .rows
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .cloned()
                .zip(row.iter().map(json_value))
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Value::from(*f),
        Value::Text(t) => serde_json::Value::from(t.clone()),
    }
}

/// File name used when a report result is exported.
pub fn report_file_name(report_name: &str) -> String {
    format!("report_{}.csv", report_name.replace(' ', "_"))
}
