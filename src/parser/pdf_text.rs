//! Canonical re-serialization of PDF-extracted specification text.
//!
//! PDF text extraction breaks lines arbitrarily and scatters labels. This
//! module finds whatever fields it can with the permissive half of the field
//! rule table and rewrites them one per line as `Key: value unit`, so the
//! result reads cleanly through [`super::parse_specification`].

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::spec_text::preprocess;
use super::{
    first_capture, first_capture_pair, load_patterns, position_patterns, resolve_raw,
    set_point_indices, FIELD_RULES,
};
use crate::patterns::{SpecField, DEFAULT_TOLERANCE_PERCENT, LINE_KEYWORDS};

/// Raw set-point text found for one index.
#[derive(Debug, Default)]
struct RawSetPoint {
    position: Option<String>,
    load: Option<(String, String)>,
}

/// Render one basic field as a canonical line.
pub fn canonical_field_line(field: SpecField, value: &str) -> String {
    match field.unit_suffix() {
        Some(unit) => format!("{}: {value} {unit}", field.label()),
        None => format!("{}: {value}", field.label()),
    }
}

/// Render the position line of the set point with one-based `index`.
pub fn canonical_position_line(index: usize, position: &str) -> String {
    format!("Set Point-{index} in mm: {position} mm")
}

/// Render the load line of the set point with one-based `index`.
pub fn canonical_load_line(index: usize, load: &str, tolerance: &str) -> String {
    format!("Set Point-{index} Load In N: {load}±{tolerance}% N")
}

/// Rewrite PDF-extracted text into canonical specification lines.
///
/// Falls back to keeping only lines that mention a known label, and returns
/// the input unchanged when even that finds nothing.
pub fn normalize_pdf_text(text: &str) -> String {
    let cleaned = preprocess(text);
    let mut lines: Vec<String> = Vec::new();

    let mut fields: BTreeMap<SpecField, String> = BTreeMap::new();
    for rule in FIELD_RULES.iter() {
        if let Some(raw) = resolve_raw(rule, &cleaned) {
            fields.insert(rule.field, raw);
        }
    }

    let mut set_points: BTreeMap<usize, RawSetPoint> = BTreeMap::new();
    for index in set_point_indices(&cleaned) {
        let entry = set_points.entry(index).or_default();
        entry.position = first_capture(&position_patterns(index), &cleaned).map(str::to_owned);
        entry.load = first_capture_pair(&load_patterns(index), &cleaned).map(|(load, tol)| {
            let tolerance =
                tol.map_or_else(|| DEFAULT_TOLERANCE_PERCENT.to_string(), str::to_owned);
            (load.to_owned(), tolerance)
        });
    }

    for (field, value) in fields.iter().filter(|(f, _)| **f != SpecField::SafetyLimit) {
        lines.push(canonical_field_line(*field, value));
    }
    for (index, point) in &set_points {
        if let Some(position) = &point.position {
            lines.push(canonical_position_line(*index, position));
        }
        if let Some((load, tolerance)) = &point.load {
            lines.push(canonical_load_line(*index, load, tolerance));
        }
    }
    if let Some(limit) = fields.get(&SpecField::SafetyLimit) {
        lines.push(canonical_field_line(SpecField::SafetyLimit, limit));
    }

    if !lines.is_empty() {
        debug!(lines = lines.len(), "pdf text rewritten to canonical form");
        return lines.join("\n") + "\n";
    }

    let kept: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            let lower = line.to_lowercase();
            LINE_KEYWORDS.iter().any(|key| lower.contains(key))
        })
        .collect();

    if kept.is_empty() {
        info!("no specification fields recognized in pdf text");
        return text.to_owned();
    }

    debug!(lines = kept.len(), "pdf text reduced to labelled lines");
    kept.join("\n") + "\n"
}
