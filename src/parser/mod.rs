//! Specification text parsing.
//!
//! Two entry points share one field rule table:
//! - [`parse_specification`] turns typed or pasted text into a [`ParsedFieldSet`]
//! - [`normalize_pdf_text`] rewrites noisy PDF-extracted text into the
//!   canonical `Key: value unit` layout that [`parse_specification`] reads
//!
//! Both are total: unrecognized input yields an empty result, never an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::patterns::{
    compile_all, Coercion, SpecField, FIELD_LABEL_START, SET_POINT_LABEL, SET_POINT_SEPARATOR,
};

pub mod pdf_text;
pub mod spec_text;

pub use pdf_text::normalize_pdf_text;
pub use spec_text::parse_specification;

/// A coerced basic-field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer field (part id).
    Integer(i64),
    /// Floating point field (lengths, diameters, coil count, safety limit).
    Number(f64),
    /// Text field (part name, part number).
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value.
    ///
    /// Integers widen to `f64`; beyond 2^53 they round to the nearest
    /// representable value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => i.to_string().parse::<f64>().ok(),
            Self::Text(_) => None,
        }
    }

    /// Text view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) | Self::Number(_) => None,
        }
    }
}

/// A set point recovered from text. Only emitted when both position and load
/// were found for its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSetPoint {
    /// Zero-based set-point index.
    pub index: usize,
    /// Position in specification length units.
    pub position: f64,
    /// Load in newtons.
    pub load: f64,
    /// Load tolerance in percent.
    pub tolerance: f64,
    /// Always `true` for parsed set points.
    pub enabled: bool,
}

/// Result of parsing specification text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedFieldSet {
    /// Basic fields that matched and coerced.
    pub basic_info: BTreeMap<SpecField, FieldValue>,
    /// Complete set points keyed by zero-based index.
    pub set_points: BTreeMap<usize, ParsedSetPoint>,
}

impl ParsedFieldSet {
    /// True when nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.basic_info.is_empty() && self.set_points.is_empty()
    }

    /// Value of a basic field.
    pub fn get(&self, field: SpecField) -> Option<&FieldValue> {
        self.basic_info.get(&field)
    }

    /// Text value of a basic field.
    pub fn text(&self, field: SpecField) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    /// Numeric value of a basic field.
    pub fn number(&self, field: SpecField) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    /// Set points in ascending index order.
    pub fn set_points(&self) -> Vec<&ParsedSetPoint> {
        self.set_points.values().collect()
    }
}

/// Compiled patterns for one basic field, most specific first.
pub(crate) struct FieldRule {
    pub(crate) field: SpecField,
    pub(crate) patterns: Vec<Regex>,
}

/// The shared field rule table, compiled once.
pub(crate) static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    SpecField::ALL
        .iter()
        .map(|&field| FieldRule {
            field,
            patterns: compile_all(&field.pattern_sources()),
        })
        .collect()
});

/// Trailing fragment that looks like the start of the next field label.
static TRAILING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[ \t]+(?:part|id|free|no|wired?|od|set|safety)\b.*$").expect("valid regex")
});

/// Every set-point label with its one-based index.
pub(crate) static SET_POINT_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){SET_POINT_LABEL}{SET_POINT_SEPARATOR}(\d+)")).expect("valid regex")
});

/// Run `patterns` in order and return the first capture, trimmed.
///
/// The first pattern that matches wins even if its capture is empty after
/// trimming; later patterns are not consulted.
pub(crate) fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Like [`first_capture`] but also returns capture group 2 when present.
pub(crate) fn first_capture_pair<'t>(
    patterns: &[Regex],
    text: &'t str,
) -> Option<(&'t str, Option<&'t str>)> {
    let caps = patterns.iter().find_map(|pattern| pattern.captures(text))?;
    let first = caps.get(1)?.as_str().trim();
    let second = caps.get(2).map(|m| m.as_str().trim());
    Some((first, second))
}

/// Resolve one field's raw text: first pattern hit, trailing label cut off.
pub(crate) fn resolve_raw(rule: &FieldRule, text: &str) -> Option<String> {
    let raw = first_capture(&rule.patterns, text)?;
    let value = TRAILING_LABEL.replace(raw, "");
    let value = value.trim();
    if value.is_empty() || FIELD_LABEL_START.is_match(value) {
        return None;
    }
    Some(value.to_owned())
}

/// Coerce raw field text; `None` when the text does not fit the field type.
pub(crate) fn coerce(field: SpecField, raw: &str) -> Option<FieldValue> {
    match field.coercion() {
        Coercion::Text => Some(FieldValue::Text(raw.to_owned())),
        Coercion::Integer => match raw.parse::<i64>() {
            Ok(value) => Some(FieldValue::Integer(value)),
            Err(e) => {
                debug!(?field, raw, error = %e, "dropping field that is not an integer");
                None
            }
        },
        Coercion::Float => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(FieldValue::Number(value)),
            Ok(_) => None,
            Err(e) => {
                debug!(?field, raw, error = %e, "dropping field that is not a number");
                None
            }
        },
    }
}

/// Distinct one-based set-point indices in order of first appearance.
pub(crate) fn set_point_indices(text: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    for caps in SET_POINT_INDEX.captures_iter(text) {
        let Some(index) = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) else {
            continue;
        };
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Label and index of the set point with one-based `index`.
fn set_point_head(index: usize) -> String {
    format!(r"(?i){SET_POINT_LABEL}{SET_POINT_SEPARATOR}{index}\b")
}

/// Position patterns for the set point with one-based `index`.
pub(crate) fn position_patterns(index: usize) -> Vec<Regex> {
    let head = set_point_head(index);
    compile_all(&[
        format!(r"{head}[ \t:]*in[ \t]*mm[ \t]*[:=]?[ \t]*(\d+(?:\.\d+)?)"),
        format!(r"{head}[ \t]*[:=]?[ \t]*(\d+(?:\.\d+)?)"),
        // Anything up to the number as long as it is not the load label.
        format!(r"{head}[^L\n\d]*?(\d+(?:\.\d+)?)"),
    ])
}

/// Load patterns for the set point with one-based `index`.
///
/// Group 1 is the load, group 2 the optional percentage tolerance.
pub(crate) fn load_patterns(index: usize) -> Vec<Regex> {
    let head = set_point_head(index);
    let tolerance = r"(?:[ \t]*(?:±|\+/-)[ \t]*(\d+(?:\.\d+)?)[ \t]*%)?";
    compile_all(&[
        format!(r"{head}[ \t:]*load[ \t]*in[ \t]*n[ \t]*[:=]?[ \t]*(\d+(?:\.\d+)?){tolerance}"),
        format!(r"{head}[ \t:]*load[ \t]*[:=]?[ \t]*(\d+(?:\.\d+)?){tolerance}"),
        format!(r"{head}[^:\n]*?load[^\n\d]*?(\d+(?:\.\d+)?){tolerance}"),
    ])
}
