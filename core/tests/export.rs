use securecheck_core::{
    export,
    rows::{TableResult, Value},
    store::LedgerStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn sample_result() -> TableResult {
    TableResult {
        columns: vec!["vehicle_number".into(), "stops".into(), "rate".into()],
        rows: vec![
            vec![
                Value::Text("RJ01AB1234".into()),
                Value::Integer(3),
                Value::Real(8.5),
            ],
            vec![
                Value::Text("KA05XY0001".into()),
                Value::Integer(1),
                Value::Real(100.0),
            ],
        ],
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn csv_round_trips_through_a_standard_parser() {
    let result = sample_result();
    let csv_text = export::to_csv_string(&result).unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, result.columns);

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), result.rows.len());
    for (parsed, original) in rows.iter().zip(&result.rows) {
        let formatted: Vec<String> = original.iter().map(|v| v.to_string()).collect();
        assert_eq!(parsed, &formatted);
    }
}

#[test]
fn column_and_row_order_are_preserved() {
    let result = sample_result();
    let csv_text = export::to_csv_string(&result).unwrap();
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(lines[0], "vehicle_number,stops,rate");
    assert_eq!(lines[1], "RJ01AB1234,3,8.5");
    assert_eq!(lines[2], "KA05XY0001,1,100");
}

#[test]
fn null_renders_as_an_empty_field() {
    let store = LedgerStore::in_memory().unwrap();
    store.init_schema().unwrap();
    let result = store
        .query("SELECT NULL AS nothing, 1 AS one", &[])
        .unwrap();

    let csv_text = export::to_csv_string(&result).unwrap();
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(lines[0], "nothing,one");
    assert_eq!(lines[1], ",1");
}

#[test]
fn fields_with_commas_are_quoted() {
    let result = TableResult {
        columns: vec!["violation".into()],
        rows: vec![vec![Value::Text("Signal, broken".into())]],
    };
    let csv_text = export::to_csv_string(&result).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.get(0), Some("Signal, broken"));
}

#[test]
fn json_export_is_an_array_of_column_keyed_objects() {
    let result = sample_result();
    let json = export::to_json(&result).unwrap();
    let parsed: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(
        parsed[0].get("vehicle_number"),
        Some(&serde_json::Value::from("RJ01AB1234"))
    );
    assert_eq!(parsed[0].get("stops"), Some(&serde_json::Value::from(3)));
    assert_eq!(parsed[1].get("rate"), Some(&serde_json::Value::from(100.0)));
}

#[test]
fn report_file_name_replaces_spaces() {
    assert_eq!(
        export::report_file_name("Top 10 vehicles in drug-related stops"),
        "report_Top_10_vehicles_in_drug-related_stops.csv"
    );
}
