//! Ingestion path: validate a candidate stop, surface the prior-arrest
//! advisory, enforce the search-type invariant, insert.
//!
//! The advisory check and the insert are two independent store operations
//! (single-writer assumption); the advisory reflects the ledger as of the
//! moment of the check.

use chrono::NaiveDateTime;

use crate::{
    error::LedgerResult,
    record::{
        validate_driver_age, validate_vehicle_number, DriverGender, StopDuration, StopOutcome,
        StopRecord, NO_SEARCH,
    },
    store::LedgerStore,
    types::StopId,
};

/// Candidate field values for one stop, as supplied by the operator.
/// The vehicle number is raw here; it is normalized during validation.
#[derive(Debug, Clone)]
pub struct StopDraft {
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

impl StopDraft {
    /// Validate and normalize into a record ready for insertion.
    /// Fails before any store interaction.
    pub fn into_record(self) -> LedgerResult<StopRecord> {
        let vehicle_number = validate_vehicle_number(&self.vehicle_number)?;
        let driver_age = validate_driver_age(self.driver_age)?;
        let search_type = if self.search_conducted {
            self.search_type
        } else {
            NO_SEARCH.to_string()
        };
        Ok(StopRecord {
            stop_id: None,
            stop_datetime: self.stop_datetime,
            country_name: self.country_name,
            vehicle_number,
            driver_gender: self.driver_gender,
            driver_age,
            driver_race: self.driver_race,
            violation: self.violation,
            stop_duration: self.stop_duration,
            stop_outcome: self.stop_outcome,
            search_conducted: self.search_conducted,
            search_type,
            is_arrested: self.is_arrested,
            drugs_related_stop: self.drugs_related_stop,
        })
    }
}

/// Prior-arrest advisory surfaced at ingestion time. Informational only,
/// never an enforcement action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorArrestAdvisory {
    /// No earlier arrest-flagged records for this vehicle.
    Clear,
    /// The vehicle has earlier arrest-flagged records.
    Flagged { count: i64 },
}

impl PriorArrestAdvisory {
    pub fn message(&self, vehicle_number: &str) -> String {
        match self {
            PriorArrestAdvisory::Clear => {
                format!("Vehicle {vehicle_number} has no prior arrest records")
            }
            PriorArrestAdvisory::Flagged { count } => {
                format!("ALERT: vehicle {vehicle_number} has {count} prior arrest record(s)")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub stop_id: StopId,
    /// Normalized form actually persisted.
    pub vehicle_number: String,
    pub advisory: PriorArrestAdvisory,
}

/// Run the full ingestion path against `store`.
pub fn ingest(store: &LedgerStore, draft: StopDraft) -> LedgerResult<IngestOutcome> {
    let record = draft.into_record()?;

    let prior = store.prior_arrest_count(&record.vehicle_number)?;
    let advisory = if prior > 0 {
        PriorArrestAdvisory::Flagged { count: prior }
    } else {
        PriorArrestAdvisory::Clear
    };
    match advisory {
        PriorArrestAdvisory::Clear => {
            log::info!("vehicle {} has no prior arrests", record.vehicle_number);
        }
        PriorArrestAdvisory::Flagged { count } => {
            log::warn!(
                "vehicle {} has {count} prior arrest record(s)",
                record.vehicle_number
            );
        }
    }

    let stop_id = store.insert_stop(&record)?;
    log::info!("stop recorded (stop_id={stop_id})");

    Ok(IngestOutcome {
        stop_id,
        vehicle_number: record.vehicle_number,
        advisory,
    })
}
