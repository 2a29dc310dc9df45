//! Tests for model-response normalization.

use springseq::config::NormalizerConfig;
use springseq::sequence::normalize::{
    canonical_description, reformat_tolerance, strip_condition_unit,
};
use springseq::sequence::{normalize_response, ResponseNormalizer, Row};

#[test]
fn plain_text_becomes_single_chat_row() {
    let table = normalize_response("Hello! I can help with spring testing.");
    assert_eq!(
        table.rows(),
        &[Row::Chat("Hello! I can help with spring testing.".to_owned())]
    );
    assert!(table.is_conversational());
}

#[test]
fn hybrid_response_splits_chat_and_rows() {
    let response = "Here is the analysis.\n---SEQUENCE_DATA_START---\n[{\"Row\":\"R00\",\"Cmd\":\"ZF\",\"Condition\":\"\",\"Unit\":\"\",\"Tolerance\":\"\",\"Speed\":\"50\"}]\n---SEQUENCE_DATA_END---\nDone.";
    let table = normalize_response(response);

    assert_eq!(table.chat_text(), Some("Here is the analysis.\n\nDone."));
    let rows: Vec<_> = table.data_rows().collect();
    assert_eq!(rows.len(), 1);
    let row = rows.first().expect("should have a data row");
    assert_eq!(row.row, "R00");
    assert_eq!(row.cmd, "ZF");
    assert_eq!(row.description, "Zero Force");
    assert_eq!(row.speed_rpm, "50");
}

#[test]
fn fenced_array_is_parsed() {
    let response = "```json\n[{\"Row\":\"R01\",\"CMD\":\"TD\",\"Condition\":\"3s\",\"Unit\":\"Sec\"}]\n```";
    let table = normalize_response(response);

    assert!(table.chat_text().is_none());
    let row = table.data_rows().next().expect("should have a data row");
    assert_eq!(row.description, "Time Delay");
    assert_eq!(row.condition, "3");
    assert_eq!(row.unit, "Sec");
}

#[test]
fn unparseable_payload_degrades_to_chat() {
    let response = "Sorry\n---SEQUENCE_DATA_START---\nnot json at all\n---SEQUENCE_DATA_END---";
    let table = normalize_response(response);

    assert!(table.is_conversational());
    assert_eq!(table.chat_text(), Some(response));
}

#[test]
fn array_embedded_in_noise_is_recovered() {
    let response = "---SEQUENCE_DATA_START---\nSure: [{\"CMD\":\"TH\"}] hope that helps\n---SEQUENCE_DATA_END---";
    let table = normalize_response(response);

    let row = table.data_rows().next().expect("should have a data row");
    assert_eq!(row.description, "Search Contact");
    assert!(table.chat_text().is_none());
}

#[test]
fn non_object_elements_are_skipped() {
    let table = normalize_response("[1, \"x\", {\"CMD\":\"ZF\"}, null]");
    assert_eq!(table.data_len(), 1);
}

#[test]
fn payload_chat_rows_merge_into_leading_chat() {
    let response = "Intro\n---SEQUENCE_DATA_START---\n[{\"Row\":\"R00\",\"CMD\":\"ZF\"},{\"Row\":\"CHAT\",\"CMD\":\"CHAT\",\"Description\":\"Note\"}]\n---SEQUENCE_DATA_END---";
    let table = normalize_response(response);

    assert_eq!(table.chat_text(), Some("Intro\n\nNote"));
    assert_eq!(table.rows().len(), 2);
}

#[test]
fn row_values_are_canonicalized() {
    let response = r#"[{"Row":"R02","CMD":"Mv(P)","Description":"Move to L1 height","Condition":" 40mm","Tolerance":"50 nominal(40,60)","Speed rpm":200}]"#;
    let table = normalize_response(response);

    let row = table.data_rows().next().expect("should have a data row");
    assert_eq!(row.description, "L1");
    assert_eq!(row.condition, "40");
    assert_eq!(row.tolerance, "50(40,60)");
    assert_eq!(row.speed_rpm, "200");
}

#[test]
fn normalizing_serialized_output_is_stable() {
    let response = "Intro\n---SEQUENCE_DATA_START---\n[{\"Row\":\"R00\",\"Cmd\":\"ZF\"},{\"Row\":\"R01\",\"CMD\":\"FL(P)\",\"Condition\":\"10 N\",\"Tolerance\":\"58 nominal(57,59)\"}]\n---SEQUENCE_DATA_END---";
    let first = normalize_response(response);
    let json = serde_json::to_string(&first).expect("should serialize");
    let second = normalize_response(&json);
    assert_eq!(first, second);
}

#[test]
fn custom_markers_are_honoured() {
    let config = NormalizerConfig {
        start_marker: "<<".to_owned(),
        end_marker: ">>".to_owned(),
    };
    let table = ResponseNormalizer::new(&config).normalize("ok << [{\"CMD\":\"ZF\"}] >>");

    assert_eq!(table.chat_text(), Some("ok"));
    assert_eq!(table.data_len(), 1);
}

#[test]
fn tolerance_without_nominal_number_is_kept() {
    assert_eq!(reformat_tolerance("nominal(40,60)"), "nominal(40,60)");
    assert_eq!(reformat_tolerance("Nominal 23.6 (21.2, 26)"), "23.6(21.2,26)");
    assert_eq!(reformat_tolerance("50(40,60)"), "50(40,60)");
}

#[test]
fn row_references_keep_their_condition() {
    assert_eq!(strip_condition_unit("R03,2"), "R03,2");
    assert_eq!(strip_condition_unit("40mm"), "40");
    assert_eq!(strip_condition_unit("40"), "40");
    assert_eq!(strip_condition_unit("abc"), "abc");
}

#[test]
fn description_lookup_order() {
    assert_eq!(canonical_description("Fr(P)", "anything"), "Force @ Position");
    assert_eq!(canonical_description("SR", "custom"), "custom");
    assert_eq!(canonical_description("SR", ""), "Spring Rate");
    assert_eq!(canonical_description("Mv(P)", "go to L2"), "L2");
    assert_eq!(canonical_description("Mv(P)", "somewhere"), "Move to Position");
    assert_eq!(canonical_description("XYZ", ""), "");
}
