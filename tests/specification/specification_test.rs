//! Tests for specification values and set-point updates.

use springseq::parser::parse_specification;
use springseq::specification::{SetPoint, SpecificationError, SpringSpecification};

#[test]
fn default_is_the_demo_spring() {
    let spec = SpringSpecification::default();
    assert_eq!(spec.part_name, "Demo Spring");
    assert_eq!(spec.set_points.len(), 3);
    assert!(spec.enabled);
}

#[test]
fn set_point_updates_return_new_values() {
    let spec = SpringSpecification::default();

    let added = spec.with_set_point_added();
    assert_eq!(added.set_points.len(), 4);
    assert_eq!(spec.set_points.len(), 3);

    let updated = spec
        .with_set_point_updated(1, SetPoint::new(30.0, 40.0))
        .expect("should update existing index");
    assert_eq!(updated.set_points[1].position_mm, 30.0);
    assert_eq!(spec.set_points[1].position_mm, 33.0);

    let removed = spec
        .with_set_point_removed(0)
        .expect("should remove existing index");
    assert_eq!(removed.set_points.len(), 2);
    assert_eq!(removed.set_points[0].position_mm, 33.0);
}

#[test]
fn out_of_range_index_is_an_error() {
    let spec = SpringSpecification::default();
    assert_eq!(
        spec.with_set_point_removed(3),
        Err(SpecificationError::SetPointOutOfRange { index: 3, len: 3 })
    );
    assert!(spec
        .with_set_point_updated(9, SetPoint::default())
        .is_err());
}

#[test]
fn apply_parsed_replaces_set_points_by_index() {
    let parsed = parse_specification(
        "Free Length: 60 mm\nSet Point-2 in mm: 20 mm\nSet Point-2 Load In N: 80±5% N",
    );
    let spec = SpringSpecification::default().apply_parsed(&parsed);

    assert_eq!(spec.free_length_mm, 60.0);
    assert_eq!(spec.set_points.len(), 3);
    let second = &spec.set_points[1];
    assert_eq!(second.position_mm, 20.0);
    assert_eq!(second.load_n, 80.0);
    assert_eq!(second.tolerance_percent, 5.0);
    assert_eq!(spec.set_points[0], SetPoint::new(40.0, 23.6));
}

#[test]
fn apply_parsed_grows_only_to_parsed_count() {
    let base = SpringSpecification {
        set_points: vec![SetPoint::new(40.0, 23.6)],
        ..SpringSpecification::default()
    };
    let parsed = parse_specification(
        "Set Point-1 in mm: 41 mm\nSet Point-1 Load In N: 24\n\
         Set Point-2 in mm: 35 mm\nSet Point-2 Load In N: 30",
    );
    let spec = base.apply_parsed(&parsed);

    assert_eq!(spec.set_points.len(), 2);
    assert_eq!(spec.set_points[0].position_mm, 41.0);
    assert_eq!(spec.set_points[1].load_n, 30.0);
}

#[test]
fn out_of_range_parsed_index_is_skipped() {
    let parsed =
        parse_specification("Set Point-5000000 in mm: 1 mm\nSet Point-5000000 Load In N: 2");
    assert_eq!(parsed.set_points.len(), 1);

    let spec = SpringSpecification::default().apply_parsed(&parsed);
    assert_eq!(spec, SpringSpecification::default());
}

#[test]
fn prompt_text_lists_enabled_set_points() {
    let mut spec = SpringSpecification::default();
    spec.set_points[1].enabled = false;
    let text = spec.to_prompt_text();

    assert!(text.starts_with("Spring Specifications:\nPart Name: Demo Spring\n"));
    assert!(text.contains("Free Length: 58 mm\n"));
    assert!(text.contains("Set Point-1 in mm: 40 mm\nSet Point-1 Load In N: 23.6±10% N\n"));
    assert!(!text.contains("Set Point-2"));
    assert!(text.contains("Set Point-3 in mm: 28 mm\n"));
    assert!(text.ends_with("Safety limit: 300 N\nUnit: mm\n"));
}

#[test]
fn prompt_text_parses_back_to_the_same_spec() {
    let spec = SpringSpecification::default();
    let parsed = parse_specification(&spec.to_prompt_text());
    assert_eq!(SpringSpecification::default().apply_parsed(&parsed), spec);
}

#[test]
fn specification_json_fills_missing_fields() {
    let spec: SpringSpecification =
        serde_json::from_str(r#"{"part_name":"X","unit":"inch"}"#).expect("should parse");
    assert_eq!(spec.part_name, "X");
    assert_eq!(spec.free_length_mm, 58.0);
    assert_eq!(spec.unit.symbol(), "inch");
}
