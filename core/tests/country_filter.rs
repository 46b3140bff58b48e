use chrono::NaiveDate;
use securecheck_core::{
    ingest::StopDraft,
    record::{DriverGender, StopDuration, StopOutcome},
    reports::{self, ReportOptions},
    store::LedgerStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_store() -> LedgerStore {
    let store = LedgerStore::in_memory().unwrap();
    store.init_schema().unwrap();
    store
}

fn log(store: &LedgerStore, country: &str, gender: DriverGender) {
    let draft = StopDraft {
        stop_datetime: NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        country_name: country.into(),
        vehicle_number: "KA05XY0001".into(),
        driver_gender: gender,
        driver_age: 30,
        driver_race: "Other".into(),
        violation: "Speeding".into(),
        stop_duration: StopDuration::UpTo15Min,
        stop_outcome: StopOutcome::Warning,
        search_conducted: false,
        search_type: String::new(),
        is_arrested: false,
        drugs_related_stop: false,
    };
    store.insert_stop(&draft.into_record().unwrap()).unwrap();
}

fn with_country(country: &str) -> ReportOptions {
    ReportOptions {
        country: Some(country.into()),
        min_group_size: None,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn filter_restricts_to_a_single_country() {
    let store = make_store();
    log(&store, "India", DriverGender::M);
    log(&store, "India", DriverGender::F);
    log(&store, "Canada", DriverGender::M);

    let all = reports::run(
        &store,
        "Gender distribution by country",
        &ReportOptions::default(),
    )
    .unwrap();
    assert_eq!(all.len(), 3);

    let india = reports::run(
        &store,
        "Gender distribution by country",
        &with_country("India"),
    )
    .unwrap();
    assert_eq!(india.len(), 2);
    for i in 0..india.len() {
        assert_eq!(india.get(i, "country_name").unwrap().as_str(), Some("India"));
    }
}

#[test]
fn filter_is_a_noop_for_reports_without_a_country_dimension() {
    let store = make_store();
    log(&store, "India", DriverGender::M);
    log(&store, "Canada", DriverGender::F);

    let plain = reports::run(&store, "Stops by hour of day", &ReportOptions::default()).unwrap();
    let filtered =
        reports::run(&store, "Stops by hour of day", &with_country("India")).unwrap();
    assert_eq!(plain, filtered, "filter must not change the result set");
}

#[test]
fn filter_applies_inside_cte_backed_reports() {
    let store = make_store();
    log(&store, "India", DriverGender::M);
    log(&store, "Canada", DriverGender::M);

    let result = reports::run(
        &store,
        "Yearly stops and arrests by country",
        &with_country("Canada"),
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.get(0, "country_name").unwrap().as_str(), Some("Canada"));
    assert_eq!(result.get(0, "stops").unwrap().as_i64(), Some(1));
}

#[test]
fn hostile_filter_value_stays_inert() {
    let store = make_store();
    log(&store, "India", DriverGender::M);

    // Bound as a value, the whole string is just a country name that
    // matches nothing.
    let result = reports::run(
        &store,
        "Gender distribution by country",
        &with_country("India' OR '1'='1"),
    )
    .unwrap();
    assert!(result.is_empty());
}

#[test]
fn empty_filter_string_is_ignored() {
    let store = make_store();
    log(&store, "India", DriverGender::M);

    let result = reports::run(
        &store,
        "Gender distribution by country",
        &with_country(""),
    )
    .unwrap();
    assert_eq!(result.len(), 1);
}
