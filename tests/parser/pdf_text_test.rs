//! Tests for PDF text normalization.

use springseq::parser::{normalize_pdf_text, parse_specification};
use springseq::patterns::SpecField;

#[test]
fn scattered_fields_become_canonical_lines() {
    let text = "Part Name: Demo Spring Free Length: 58 mm Set Point-1 in mm: 40 Set Point-1 Load In N: 23.6";
    let expected = "Part Name: Demo Spring\nFree Length: 58 mm\nSet Point-1 in mm: 40 mm\nSet Point-1 Load In N: 23.6±10% N\n";
    assert_eq!(normalize_pdf_text(text), expected);
}

#[test]
fn safety_limit_comes_last() {
    let text = "Safety limit: 300 N\nFree Length: 58 mm";
    assert_eq!(
        normalize_pdf_text(text),
        "Free Length: 58 mm\nSafety limit: 300 N\n"
    );
}

#[test]
fn canonical_output_parses_like_the_source() {
    let text = "Part Name: Demo Spring Free Length: 58 mm Set Point-1 in mm: 40 Set Point-1 Load In N: 23.6";
    let direct = parse_specification(text);
    let via_pdf = parse_specification(&normalize_pdf_text(text));
    assert_eq!(direct, via_pdf);
}

#[test]
fn falls_back_to_keyword_lines() {
    let text = "Total coils: many\nnothing here";
    assert_eq!(normalize_pdf_text(text), "Total coils: many\n");
}

#[test]
fn unrecognized_text_is_returned_unchanged() {
    let text = "hello world\nsecond line";
    assert_eq!(normalize_pdf_text(text), text);
}

#[test]
fn values_on_the_line_after_their_label_are_found() {
    let cleaned = normalize_pdf_text("Free Length\n58 mm\nWire Dia\n3.0");
    assert_eq!(cleaned, "Free Length: 58 mm\nWire Dia: 3.0 mm\n");

    let parsed = parse_specification(&cleaned);
    assert_eq!(parsed.number(SpecField::FreeLength), Some(58.0));
    assert_eq!(parsed.number(SpecField::WireDiameter), Some(3.0));
}

#[test]
fn set_point_index_without_dash_is_found() {
    let text = "Set Point 1 in mm 40 Set Point 1 Load In N 23.6";
    assert_eq!(
        normalize_pdf_text(text),
        "Set Point-1 in mm: 40 mm\nSet Point-1 Load In N: 23.6±10% N\n"
    );

    let text = "Set Point: 2 in mm: 33\nSet Point: 2 Load In N: 34.14";
    let parsed = parse_specification(&normalize_pdf_text(text));
    let point = parsed.set_points.get(&1).expect("should have set point 2");
    assert_eq!(point.position, 33.0);
    assert_eq!(point.load, 34.14);
}

#[test]
fn empty_label_keeps_its_neighbour_intact() {
    let cleaned = normalize_pdf_text("Part Name:\nPart Number: X-1");
    assert_eq!(cleaned, "Part Number: X-1\n");
}
