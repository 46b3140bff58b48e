//! The stop record model: field enums, normalization, validation.
//!
//! A record is validated here exactly once, on its way into the store.
//! Nothing in this module touches the database.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::types::StopId;

/// Violations offered by the logging front end. The store keeps
/// `violation` as free text; this set constrains operator input only.
pub const VIOLATIONS: &[&str] = &["Speeding", "DUI", "Signal", "Seatbelt", "Equipment", "Other"];

/// Value stored in `search_type` whenever no search took place.
pub const NO_SEARCH: &str = "No Search";

/// Minimum vehicle number length after normalization.
pub const MIN_VEHICLE_NUMBER_LEN: usize = 4;

pub const MAX_DRIVER_AGE: u32 = 120;

/// Storage form of `stop_datetime`; `strftime` derivations in the report
/// catalog depend on this layout.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Field enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverGender {
    M,
    F,
    Unknown,
}

impl DriverGender {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverGender::M => "M",
            DriverGender::F => "F",
            DriverGender::Unknown => "Unknown",
        }
    }

    /// Strict parse of the three canonical labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "M" => Some(DriverGender::M),
            "F" => Some(DriverGender::F),
            "Unknown" => Some(DriverGender::Unknown),
            _ => None,
        }
    }

    /// Lenient parse used by the bulk importer: unrecognized labels
    /// collapse to `Unknown`.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or(DriverGender::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopDuration {
    UpTo15Min,
    From16To30Min,
    Over30Min,
}

impl StopDuration {
    pub fn as_str(self) -> &'static str {
        match self {
            StopDuration::UpTo15Min => "0-15 Min",
            StopDuration::From16To30Min => "16-30 Min",
            StopDuration::Over30Min => ">30 Min",
        }
    }

    /// Bucket midpoint in minutes, used to approximate a continuous
    /// average over the categorical duration field.
    pub fn midpoint_minutes(self) -> f64 {
        match self {
            StopDuration::UpTo15Min => 7.5,
            StopDuration::From16To30Min => 23.0,
            StopDuration::Over30Min => 45.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0-15 Min" => Some(StopDuration::UpTo15Min),
            "16-30 Min" => Some(StopDuration::From16To30Min),
            ">30 Min" => Some(StopDuration::Over30Min),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopOutcome {
    Warning,
    Citation,
    Arrest,
}

impl StopOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            StopOutcome::Warning => "Warning",
            StopOutcome::Citation => "Citation",
            StopOutcome::Arrest => "Arrest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Warning" => Some(StopOutcome::Warning),
            "Citation" => Some(StopOutcome::Citation),
            "Arrest" => Some(StopOutcome::Arrest),
            _ => None,
        }
    }
}

// ── Normalization & validation ───────────────────────────────────────────────

/// Trim surrounding whitespace and uppercase.
pub fn normalize_vehicle_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize and validate a vehicle number. Runs before any store
/// interaction; a failure here leaves the ledger untouched.
pub fn validate_vehicle_number(raw: &str) -> LedgerResult<String> {
    let normalized = normalize_vehicle_number(raw);
    if normalized.chars().count() < MIN_VEHICLE_NUMBER_LEN {
        return Err(LedgerError::validation(
            "vehicle_number",
            format!("must be at least {MIN_VEHICLE_NUMBER_LEN} characters after normalization"),
        ));
    }
    Ok(normalized)
}

pub fn validate_driver_age(age: u32) -> LedgerResult<u32> {
    if age > MAX_DRIVER_AGE {
        return Err(LedgerError::validation(
            "driver_age",
            format!("must be between 0 and {MAX_DRIVER_AGE}, got {age}"),
        ));
    }
    Ok(age)
}

/// Parse operator-supplied date (`YYYY-MM-DD`) and time (`HH:MM` or
/// `HH:MM:SS`) strings into the stored datetime.
pub fn parse_stop_datetime(date: &str, time: &str) -> LedgerResult<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| LedgerError::validation("stop_date", format!("expected YYYY-MM-DD: {e}")))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .map_err(|e| LedgerError::validation("stop_time", format!("expected HH:MM[:SS]: {e}")))?;
    Ok(date.and_time(time))
}

/// Parse a combined `YYYY-MM-DD HH:MM[:SS]` datetime string, as produced
/// by the offline cleaning tool.
pub fn parse_datetime_str(s: &str) -> LedgerResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|e| LedgerError::validation("stop_datetime", format!("{e}")))
}

// ── The record ───────────────────────────────────────────────────────────────

/// One persisted traffic-stop event. Created only by the ingestion path,
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub stop_id: Option<StopId>,
    pub stop_datetime: NaiveDateTime,
    pub country_name: String,
    pub vehicle_number: String,
    pub driver_gender: DriverGender,
    pub driver_age: u32,
    pub driver_race: String,
    pub violation: String,
    pub stop_duration: StopDuration,
    pub stop_outcome: StopOutcome,
    pub search_conducted: bool,
    pub search_type: String,
    pub is_arrested: bool,
    pub drugs_related_stop: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_number_is_uppercased_and_trimmed() {
        assert_eq!(normalize_vehicle_number("  rj01ab1234 "), "RJ01AB1234");
    }

    #[test]
    fn short_vehicle_numbers_are_rejected() {
        assert!(validate_vehicle_number("AB1").is_err());
        assert!(validate_vehicle_number("   ").is_err());
        assert!(validate_vehicle_number("ab12").is_ok());
    }

    #[test]
    fn duration_midpoints_match_labels() {
        assert_eq!(StopDuration::parse("0-15 Min"), Some(StopDuration::UpTo15Min));
        assert_eq!(StopDuration::UpTo15Min.midpoint_minutes(), 7.5);
        assert_eq!(StopDuration::From16To30Min.midpoint_minutes(), 23.0);
        assert_eq!(StopDuration::Over30Min.midpoint_minutes(), 45.0);
        assert_eq!(StopDuration::parse("45 Min"), None);
    }

    #[test]
    fn datetime_accepts_minute_precision() {
        let full = parse_stop_datetime("2024-03-14", "10:30:00").unwrap();
        let short = parse_stop_datetime("2024-03-14", "10:30").unwrap();
        assert_eq!(full, short);
        assert!(parse_stop_datetime("14/03/2024", "10:30").is_err());
    }

    #[test]
    fn gender_parse_is_strict_unless_lenient() {
        assert_eq!(DriverGender::parse("M"), Some(DriverGender::M));
        assert_eq!(DriverGender::parse("male"), None);
        assert_eq!(DriverGender::parse_lenient("male"), DriverGender::Unknown);
    }

    #[test]
    fn ages_above_120_are_rejected() {
        assert!(validate_driver_age(120).is_ok());
        assert!(validate_driver_age(121).is_err());
    }
}
