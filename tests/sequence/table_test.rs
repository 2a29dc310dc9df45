//! Tests for sequence tables and error-message extraction.

use springseq::sequence::{extract_error_message, Row, SequenceRow, SequenceTable};

fn data_row(row: &str, cmd: &str) -> SequenceRow {
    SequenceRow {
        row: row.to_owned(),
        cmd: cmd.to_owned(),
        ..SequenceRow::default()
    }
}

#[test]
fn chat_row_leads_the_table() {
    let table = SequenceTable::new(
        Some("hello".to_owned()),
        vec![data_row("R00", "ZF"), data_row("R01", "TH")],
    );

    assert_eq!(table.rows().first(), Some(&Row::Chat("hello".to_owned())));
    assert_eq!(table.data_len(), 2);
    assert!(!table.is_conversational());
}

#[test]
fn records_always_have_seven_columns() {
    let table = SequenceTable::new(Some("hi".to_owned()), vec![data_row("R00", "ZF")]);
    let json = serde_json::to_value(&table).expect("should serialize");
    let rows = json.as_array().expect("table serializes as an array");

    assert_eq!(rows.len(), 2);
    for row in rows {
        let object = row.as_object().expect("row serializes as an object");
        assert_eq!(object.len(), 7);
        assert!(object.values().all(serde_json::Value::is_string));
    }
    assert_eq!(table.to_records()[0], SequenceRow::chat("hi"));
}

#[test]
fn error_message_from_json_body() {
    let body = r#"{"error": "rate limit exceeded", "code": 429}"#;
    assert_eq!(extract_error_message(body), "rate limit exceeded");
}

#[test]
fn error_message_from_plain_text() {
    assert_eq!(
        extract_error_message("ERROR: model overloaded\nretry later"),
        "model overloaded"
    );
    assert_eq!(extract_error_message("all good"), "");
}
