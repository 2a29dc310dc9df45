//! Normalization of language-model responses into sequence tables.
//!
//! A response is plain text, a JSON array of rows, or a hybrid of both with
//! the array between start/end markers. Whatever arrives, the result is a
//! well-formed [`SequenceTable`]; a payload that will not parse degrades to a
//! single chat row carrying the response text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{Row, SequenceRow, SequenceTable};
use crate::config::NormalizerConfig;
use crate::patterns::{
    canonical_column, command_description, sequence_description, COL_CMD, COL_CONDITION,
    COL_DESCRIPTION, COL_ROW, COL_SPEED, COL_TOLERANCE, COL_UNIT, MOVE_TO_POSITION,
};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").expect("valid regex"));

/// `<nominal> ... (<min>,<max>)` with anything between.
static NOMINAL_TOLERANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*?(\d+(?:\.\d+)?).*?\(\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*\)")
        .expect("valid regex")
});

/// Loop/scrag back-reference such as `R03,2`.
static ROW_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\d+\s*,\s*\d+$").expect("valid regex"));

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)").expect("valid regex"));

/// Normalize a response with the default markers.
pub fn normalize_response(response: &str) -> SequenceTable {
    ResponseNormalizer::default().normalize(response)
}

/// Splits, parses and canonicalizes model responses.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    start_marker: String,
    end_marker: String,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl ResponseNormalizer {
    /// Normalizer using the markers from `config`.
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            start_marker: config.start_marker.clone(),
            end_marker: config.end_marker.clone(),
        }
    }

    /// Turn a model response into a sequence table. Never fails.
    pub fn normalize(&self, response: &str) -> SequenceTable {
        let cleaned = strip_code_fences(response);

        let (conversation, payload) = match self.split_hybrid(&cleaned) {
            Some((conversation, payload)) => (conversation, payload),
            None if cleaned.starts_with('[') && cleaned.ends_with(']') => (None, cleaned.as_str()),
            None => {
                debug!("response has no sequence data");
                return SequenceTable::chat_only(&cleaned);
            }
        };

        let Some(objects) = parse_row_objects(payload) else {
            warn!(
                text_preview = preview(payload),
                "sequence payload is not a JSON array of rows"
            );
            return SequenceTable::chat_only(&cleaned);
        };

        let mut chat_parts: Vec<String> = conversation.into_iter().collect();
        let mut data = Vec::with_capacity(objects.len());
        for object in &objects {
            match normalize_row(object) {
                Row::Chat(text) => chat_parts.push(text),
                Row::Data(row) => data.push(row),
            }
        }

        let chat = join_non_empty(chat_parts.iter().map(String::as_str));
        debug!(rows = data.len(), has_chat = chat.is_some(), "normalized sequence");
        SequenceTable::new(chat, data)
    }

    /// Split `text` around the data markers.
    ///
    /// Returns the conversational text (before and after the markers, joined
    /// by a blank line) and the payload between them.
    fn split_hybrid<'t>(&self, text: &'t str) -> Option<(Option<String>, &'t str)> {
        let start = text.find(&self.start_marker)?;
        let body_start = start.checked_add(self.start_marker.len())?;
        let rest = text.get(body_start..)?;
        let end = rest.find(&self.end_marker)?;
        let after_start = end.checked_add(self.end_marker.len())?;

        let before = text.get(..start)?.trim();
        let payload = rest.get(..end)?.trim();
        let after = rest.get(after_start..)?.trim();

        Some((join_non_empty([before, after]), payload))
    }
}

fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_owned()
}

fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let kept: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n\n"))
    }
}

fn preview(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map_or(text.len(), |(index, _)| index);
    text.get(..end).unwrap_or(text)
}

/// Parse `payload` as an array of row objects, retrying once on the first
/// bracket-balanced `[...]` span. Non-object elements are skipped.
fn parse_row_objects(payload: &str) -> Option<Vec<Map<String, Value>>> {
    let array = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        first => {
            if let Err(e) = &first {
                debug!(error = %e, "payload is not valid JSON, retrying on array span");
            }
            let span = find_array_span(payload)?;
            match serde_json::from_str::<Value>(span) {
                Ok(Value::Array(items)) => items,
                _ => return None,
            }
        }
    };

    Some(
        array
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                other => {
                    debug!(element = %other, "skipping non-object sequence element");
                    None
                }
            })
            .collect(),
    )
}

/// The first top-level `[...]` span of `text`, ignoring brackets in strings.
pub fn find_array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.get(start..)?.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '[' => depth = depth.saturating_add(1),
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start.checked_add(offset)?.checked_add(1)?;
                    return text.get(start..end);
                }
            }
            _ => {}
        }
    }
    None
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rename synonym columns, drop unknown ones, and canonicalize the values.
fn normalize_row(object: &Map<String, Value>) -> Row {
    let mut columns: HashMap<&'static str, String> = HashMap::new();

    // Exact canonical names win over synonyms for the same column.
    for (key, value) in object {
        if let Some(canonical) = canonical_column(key).filter(|c| *c == key.as_str()) {
            columns.insert(canonical, value_text(value));
        }
    }
    for (key, value) in object {
        if let Some(canonical) = canonical_column(key) {
            columns
                .entry(canonical)
                .or_insert_with(|| value_text(value));
        }
    }

    let mut take = |column: &str| columns.remove(column).unwrap_or_default();
    let record = SequenceRow {
        row: take(COL_ROW),
        cmd: take(COL_CMD),
        description: take(COL_DESCRIPTION),
        condition: take(COL_CONDITION),
        unit: take(COL_UNIT),
        tolerance: take(COL_TOLERANCE),
        speed_rpm: take(COL_SPEED),
    };

    if record.is_chat() {
        return Row::Chat(record.description);
    }

    Row::Data(SequenceRow {
        description: canonical_description(&record.cmd, &record.description),
        tolerance: reformat_tolerance(&record.tolerance),
        condition: strip_condition_unit(&record.condition),
        ..record
    })
}

/// Standard description for `cmd`.
///
/// `Mv(P)` keeps an `L1`/`L2` position label. Commands without a sequence
/// description keep a non-empty current one, else get the catalogue text.
pub fn canonical_description(cmd: &str, current: &str) -> String {
    if cmd == MOVE_TO_POSITION {
        if current.contains("L1") {
            return "L1".to_owned();
        }
        if current.contains("L2") {
            return "L2".to_owned();
        }
    }
    if let Some(description) = sequence_description(cmd) {
        return description.to_owned();
    }
    if !current.is_empty() {
        return current.to_owned();
    }
    command_description(cmd).unwrap_or_default().to_owned()
}

/// Rewrite a tolerance mentioning "nominal" into `value(min,max)`.
pub fn reformat_tolerance(tolerance: &str) -> String {
    if !tolerance.to_lowercase().contains("nominal") {
        return tolerance.to_owned();
    }
    match NOMINAL_TOLERANCE.captures(tolerance) {
        Some(caps) => {
            let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            format!("{}({},{})", group(1), group(2), group(3))
        }
        None => tolerance.to_owned(),
    }
}

/// Reduce a condition to its leading number, leaving row references alone.
pub fn strip_condition_unit(condition: &str) -> String {
    let trimmed = condition.trim();
    if ROW_REFERENCE.is_match(trimmed) {
        return condition.to_owned();
    }
    match LEADING_NUMBER.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(number) if number.as_str() != condition => number.as_str().to_owned(),
        _ => condition.to_owned(),
    }
}
