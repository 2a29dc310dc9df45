//! Rendering of parameter maps as prompt lines.

use super::extractor::{ParamValue, ParameterMap, TIMESTAMP_KEY};

/// Render `params` as one `Key: value` line per entry.
///
/// The timestamp is skipped. Numbers get a precision that keeps small
/// values readable and a unit chosen from the key name.
pub fn format_parameter_text(params: &ParameterMap) -> String {
    params
        .all_entries()
        .into_iter()
        .filter(|(key, _)| *key != TIMESTAMP_KEY)
        .map(|(key, value)| format!("{key}: {}", format_value(key, &value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_value(key: &str, value: &ParamValue) -> String {
    match value {
        ParamValue::Number(n) => {
            let number = format_number(*n);
            match unit_for(key) {
                Some(unit) => format!("{number} {unit}"),
                None => number,
            }
        }
        ParamValue::Text(s) => s.clone(),
    }
}

/// Three decimals below 0.1, two below 1, one otherwise.
pub fn format_number(value: f64) -> String {
    if value < 0.1 {
        format!("{value:.3}")
    } else if value < 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.1}")
    }
}

/// Unit suffix implied by a parameter name.
pub fn unit_for(key: &str) -> Option<&'static str> {
    if key.contains("Length") || key.contains("Diameter") {
        Some("mm")
    } else if key.contains("Force") || key.contains("Load") {
        Some("N")
    } else if key.contains("Rate") {
        Some("N/mm")
    } else {
        None
    }
}
