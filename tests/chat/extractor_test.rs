//! Tests for chat parameter extraction.

use springseq::chat::{extract_parameters, ParamValue, TestType};

#[test]
fn extracts_test_type_and_numbers_in_order() {
    let text = "Compression test, free length 50mm, wire diameter 3.2 and spring rate 12";
    let params = extract_parameters(text);

    assert_eq!(params.test_type(), Some("Compression"));
    assert_eq!(params.number("Free Length"), Some(50.0));
    assert_eq!(params.number("Wire Diameter"), Some(3.2));
    assert_eq!(params.number("Spring Rate"), Some(12.0));

    let keys: Vec<&str> = params.entries().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec!["Test Type", "Free Length", "Wire Diameter", "Spring Rate"]
    );
    assert_eq!(params.prompt(), text);
}

#[test]
fn compression_wins_over_tension() {
    assert_eq!(
        TestType::detect("compress then pull"),
        Some(TestType::Compression)
    );
    assert_eq!(TestType::detect("stretch it"), Some(TestType::Tension));
    assert_eq!(TestType::detect("measure it"), None);
}

#[test]
fn identifiers_stay_text() {
    let params = extract_parameters("part number AB-12 for model X7");
    assert_eq!(params.text("Part Number"), Some("AB-12"));
    assert_eq!(params.text("Model Number"), Some("X7"));
}

#[test]
fn plain_chat_extracts_nothing() {
    let params = extract_parameters("good morning");
    assert!(params.is_empty());
    assert!(params.test_type().is_none());
}

#[test]
fn reserved_keys_come_last_in_json() {
    let params = extract_parameters("free length 40");
    let json = serde_json::to_value(&params).expect("should serialize");

    assert_eq!(json["Free Length"], 40.0);
    assert_eq!(json["prompt"], "free length 40");
    assert!(json["Timestamp"].is_string());

    let all = params.all_entries();
    let keys: Vec<&str> = all.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["Free Length", "Timestamp", "prompt"]);
    assert_eq!(
        all.first().map(|(_, v)| v.clone()),
        Some(ParamValue::Number(40.0))
    );
}
