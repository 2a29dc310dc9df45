//! Engineering-parameter extraction from chat messages.

use chrono::{DateTime, Local};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::patterns::{ParameterKind, COMPRESSION_KEYWORDS, PARAMETER_PATTERNS, TENSION_KEYWORDS};

/// Key under which the detected test type is stored.
pub const TEST_TYPE_KEY: &str = "Test Type";

/// Reserved key for the generation timestamp.
pub const TIMESTAMP_KEY: &str = "Timestamp";

/// Reserved key for the verbatim original message.
pub const PROMPT_KEY: &str = "prompt";

/// Timestamp rendering used in parameter maps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Spring test direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    /// Spring is compressed.
    Compression,
    /// Spring is extended.
    Tension,
}

impl TestType {
    /// Display name stored in parameter maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compression => "Compression",
            Self::Tension => "Tension",
        }
    }

    /// Detect the test type from keywords; compression wins over tension.
    pub fn detect(text: &str) -> Option<Self> {
        if COMPRESSION_KEYWORDS.is_match(text) {
            Some(Self::Compression)
        } else if TENSION_KEYWORDS.is_match(text) {
            Some(Self::Tension)
        } else {
            None
        }
    }
}

/// A parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Numeric value.
    Number(f64),
    /// Text value, or numeric text that failed to parse.
    Text(String),
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Parameters extracted from one message, in extraction order.
///
/// Besides the named entries it always carries the verbatim message and the
/// time it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(String, ParamValue)>,
    timestamp: DateTime<Local>,
    prompt: String,
}

impl ParameterMap {
    /// Empty map for `prompt`, stamped now.
    pub fn new(prompt: &str) -> Self {
        Self {
            entries: Vec::new(),
            timestamp: Local::now(),
            prompt: prompt.to_owned(),
        }
    }

    /// Insert or replace an entry, keeping first-insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Value for `key`, excluding the reserved keys.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Numeric value for `key`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Text value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(ParamValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Extracted entries, without the reserved keys.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of extracted entries, without the reserved keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detected test type, if any.
    pub fn test_type(&self) -> Option<&str> {
        self.text(TEST_TYPE_KEY)
    }

    /// The verbatim original message.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// When the map was produced.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Every entry including the reserved keys, in rendering order:
    /// extracted entries, then timestamp, then prompt.
    pub fn all_entries(&self) -> Vec<(&str, ParamValue)> {
        let mut all: Vec<(&str, ParamValue)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        all.push((
            TIMESTAMP_KEY,
            ParamValue::Text(self.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        ));
        all.push((PROMPT_KEY, ParamValue::Text(self.prompt.clone())));
        all
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let all = self.all_entries();
        let mut map = serializer.serialize_map(Some(all.len()))?;
        for (key, value) in &all {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Extract test type and engineering parameters from a chat message.
///
/// Never fails. Numeric fields that do not parse keep their raw text.
pub fn extract_parameters(text: &str) -> ParameterMap {
    let mut params = ParameterMap::new(text);

    if let Some(test_type) = TestType::detect(text) {
        params.insert(TEST_TYPE_KEY, ParamValue::Text(test_type.as_str().to_owned()));
    }

    for pattern in PARAMETER_PATTERNS.iter() {
        let Some(raw) = pattern
            .regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        else {
            continue;
        };

        let value = match pattern.kind {
            ParameterKind::Numeric => raw
                .parse::<f64>()
                .map_or_else(|_| ParamValue::Text(raw.to_owned()), ParamValue::Number),
            ParameterKind::Text => ParamValue::Text(raw.to_owned()),
        };
        params.insert(pattern.name, value);
    }

    debug!(count = params.len(), "extracted chat parameters");
    params
}
