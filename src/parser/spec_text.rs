//! Field and set-point extraction from typed specification text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{
    coerce, first_capture, first_capture_pair, load_patterns, position_patterns, resolve_raw,
    set_point_indices, ParsedFieldSet, ParsedSetPoint, FIELD_RULES,
};
use crate::patterns::{DEFAULT_TOLERANCE_PERCENT, FIELD_KEYWORDS};

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\r\u{a0}]+").expect("valid regex"));

/// Put every field label on its own line and collapse horizontal whitespace.
///
/// Blank lines are dropped. Line breaks already present are kept.
pub fn preprocess(text: &str) -> String {
    let separated = FIELD_KEYWORDS.replace_all(text, "\n$1");
    separated
        .lines()
        .map(|line| HORIZONTAL_WS.replace_all(line, " ").trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract basic fields and set points from specification text.
///
/// Never fails: fields that do not match or do not coerce are left out, and
/// a set point is only reported when both its position and load are found.
pub fn parse_specification(text: &str) -> ParsedFieldSet {
    let prepared = preprocess(text);
    let mut parsed = ParsedFieldSet::default();

    for rule in FIELD_RULES.iter() {
        let Some(raw) = resolve_raw(rule, &prepared) else {
            continue;
        };
        if let Some(value) = coerce(rule.field, &raw) {
            parsed.basic_info.insert(rule.field, value);
        }
    }

    for index in set_point_indices(&prepared) {
        // "Set Point-0" has no one-based meaning.
        let Some(zero_based) = index.checked_sub(1) else {
            continue;
        };

        let position = first_capture(&position_patterns(index), &prepared)
            .and_then(|raw| raw.parse::<f64>().ok());
        let load = first_capture_pair(&load_patterns(index), &prepared).and_then(|(raw, tol)| {
            let load = raw.parse::<f64>().ok()?;
            let tolerance = tol.and_then(|t| t.parse::<f64>().ok());
            Some((load, tolerance))
        });

        match (position, load) {
            (Some(position), Some((load, tolerance))) => {
                parsed.set_points.insert(
                    zero_based,
                    ParsedSetPoint {
                        index: zero_based,
                        position,
                        load,
                        tolerance: tolerance.unwrap_or(DEFAULT_TOLERANCE_PERCENT),
                        enabled: true,
                    },
                );
            }
            _ => {
                debug!(index, "set point incomplete, skipping");
            }
        }
    }

    debug!(
        fields = parsed.basic_info.len(),
        set_points = parsed.set_points.len(),
        "parsed specification text"
    );
    parsed
}
