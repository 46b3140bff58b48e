use chrono::NaiveDate;
use securecheck_core::{
    ingest::StopDraft,
    record::{DriverGender, StopDuration, StopOutcome},
    store::LedgerStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_store() -> LedgerStore {
    let store = LedgerStore::in_memory().unwrap();
    store.init_schema().unwrap();
    store
}

fn draft(vehicle: &str) -> StopDraft {
    StopDraft {
        stop_datetime: NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
        country_name: "India".into(),
        vehicle_number: vehicle.into(),
        driver_gender: DriverGender::M,
        driver_age: 30,
        driver_race: "Other".into(),
        violation: "Speeding".into(),
        stop_duration: StopDuration::UpTo15Min,
        stop_outcome: StopOutcome::Warning,
        search_conducted: false,
        search_type: String::new(),
        is_arrested: false,
        drugs_related_stop: false,
    }
}

fn insert(store: &LedgerStore, vehicle: &str) -> i64 {
    store
        .insert_stop(&draft(vehicle).into_record().unwrap())
        .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn init_schema_is_idempotent() {
    let store = make_store();
    // A second init must not alter or clear the existing table.
    insert(&store, "KA05XY0001");
    store.init_schema().unwrap();
    assert_eq!(store.stop_count().unwrap(), 1);
}

#[test]
fn insert_assigns_increasing_identities() {
    let store = make_store();
    let first = insert(&store, "KA05XY0001");
    let second = insert(&store, "KA05XY0002");
    let third = insert(&store, "KA05XY0001");
    assert_eq!(first, 1);
    assert!(second > first, "identities must increase: {first} then {second}");
    assert!(third > second);
}

#[test]
fn recreate_discards_all_rows_and_restarts_identities() {
    let store = make_store();
    for _ in 0..3 {
        insert(&store, "KA05XY0001");
    }
    assert_eq!(store.stop_count().unwrap(), 3);

    store.recreate().unwrap();
    assert_eq!(store.stop_count().unwrap(), 0);
    assert_eq!(insert(&store, "KA05XY0002"), 1);
}

#[test]
fn table_info_lists_all_columns() {
    let store = make_store();
    let info = store.table_info().unwrap();
    let names: Vec<&str> = info.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "stop_id",
            "stop_datetime",
            "country_name",
            "vehicle_number",
            "driver_gender",
            "driver_age",
            "driver_race",
            "violation",
            "stop_duration",
            "stop_outcome",
            "search_conducted",
            "search_type",
            "is_arrested",
            "drugs_related_stop",
        ]
    );

    let stop_id = &info[0];
    assert!(stop_id.primary_key);
    let datetime = &info[1];
    assert!(datetime.notnull, "stop_datetime must be NOT NULL");
}

#[test]
fn query_surface_is_read_only() {
    let store = make_store();
    insert(&store, "KA05XY0001");

    let result = store.query(
        "INSERT INTO stop_records (stop_datetime) VALUES ('2024-01-01 00:00:00')",
        &[],
    );
    assert!(result.is_err(), "mutation through query() must fail");
    assert_eq!(store.stop_count().unwrap(), 1, "row count must be unchanged");

    let result = store.query("DELETE FROM stop_records", &[]);
    assert!(result.is_err());
    assert_eq!(store.stop_count().unwrap(), 1);
}

#[test]
fn query_binds_parameters() {
    let store = make_store();
    insert(&store, "KA05XY0001");
    insert(&store, "MH12AB0001");

    let result = store
        .query(
            "SELECT COUNT(*) AS n FROM stop_records WHERE vehicle_number = ?1",
            &[&"KA05XY0001"],
        )
        .unwrap();
    assert_eq!(result.get(0, "n").unwrap().as_i64(), Some(1));
}

#[test]
fn booleans_are_persisted_as_integers() {
    let store = make_store();
    let mut d = draft("KA05XY0001");
    d.search_conducted = true;
    d.search_type = "Frisk".into();
    d.is_arrested = true;
    store.insert_stop(&d.into_record().unwrap()).unwrap();

    let result = store
        .query(
            "SELECT search_conducted, is_arrested, drugs_related_stop FROM stop_records",
            &[],
        )
        .unwrap();
    assert_eq!(result.get(0, "search_conducted").unwrap().as_i64(), Some(1));
    assert_eq!(result.get(0, "is_arrested").unwrap().as_i64(), Some(1));
    assert_eq!(result.get(0, "drugs_related_stop").unwrap().as_i64(), Some(0));
}

#[test]
fn vehicle_history_is_newest_first() {
    let store = make_store();
    let mut early = draft("KA05XY0001");
    early.stop_datetime = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let mut late = draft("KA05XY0001");
    late.stop_datetime = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    store.insert_stop(&early.into_record().unwrap()).unwrap();
    store.insert_stop(&late.into_record().unwrap()).unwrap();
    insert(&store, "MH12AB0001");

    let history = store.vehicle_history("KA05XY0001", 200).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(
        history.get(0, "stop_datetime").unwrap().as_str(),
        Some("2024-06-01 08:00:00")
    );
    assert_eq!(
        history.get(1, "stop_datetime").unwrap().as_str(),
        Some("2023-01-01 08:00:00")
    );
}

#[test]
fn kpi_summary_on_empty_store_is_all_zero() {
    let store = make_store();
    let kpis = store.kpi_summary().unwrap();
    assert_eq!(kpis.total_stops, 0);
    assert_eq!(kpis.total_arrests, 0);
    assert_eq!(kpis.drug_stops, 0);
    assert_eq!(kpis.drug_rate_pct, 0.0);
    assert_eq!(kpis.unique_vehicles, 0);
}

#[test]
fn kpi_summary_math() {
    let store = make_store();
    for i in 0..4 {
        let mut d = draft(if i < 2 { "KA05XY0001" } else { "MH12AB0001" });
        d.is_arrested = i < 2;
        d.drugs_related_stop = i == 0;
        store.insert_stop(&d.into_record().unwrap()).unwrap();
    }

    let kpis = store.kpi_summary().unwrap();
    assert_eq!(kpis.total_stops, 4);
    assert_eq!(kpis.total_arrests, 2);
    assert_eq!(kpis.drug_stops, 1);
    assert!((kpis.drug_rate_pct - 25.0).abs() < 1e-9);
    assert_eq!(kpis.unique_vehicles, 2);
}
