//! Canonical spring-test sequence tables.
//!
//! Every row has exactly seven string columns (`Row`, `CMD`, `Description`,
//! `Condition`, `Unit`, `Tolerance`, `Speed rpm`); an empty string means
//! "not applicable". Conversational text travels in a single chat row that
//! always leads the table. Internally the chat row is a [`Row::Chat`]
//! variant; the `CHAT` sentinel only appears in serialized output.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::patterns::{compile_all, CHAT_SENTINEL};

pub mod normalize;

pub use normalize::{normalize_response, ResponseNormalizer};

/// One instruction of a test program, in its serialized seven-column shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRow {
    /// Row label (`R00`, `R01`, ...).
    #[serde(rename = "Row", default)]
    pub row: String,
    /// Command code.
    #[serde(rename = "CMD", default)]
    pub cmd: String,
    /// Description.
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Numeric condition, or a row back-reference such as `R03,2`.
    #[serde(rename = "Condition", default)]
    pub condition: String,
    /// Unit symbol.
    #[serde(rename = "Unit", default)]
    pub unit: String,
    /// Tolerance as `nominal(min,max)`.
    #[serde(rename = "Tolerance", default)]
    pub tolerance: String,
    /// Rotational speed.
    #[serde(rename = "Speed rpm", default)]
    pub speed_rpm: String,
}

impl SequenceRow {
    /// The serialized form of a chat row carrying `text`.
    pub fn chat(text: &str) -> Self {
        Self {
            row: CHAT_SENTINEL.to_owned(),
            cmd: CHAT_SENTINEL.to_owned(),
            description: text.to_owned(),
            ..Self::default()
        }
    }

    /// True when the row carries the chat sentinel.
    pub fn is_chat(&self) -> bool {
        self.row == CHAT_SENTINEL || self.cmd == CHAT_SENTINEL
    }
}

/// A row of a sequence table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Conversational text from the model.
    Chat(String),
    /// A test instruction.
    Data(SequenceRow),
}

impl Row {
    /// Seven-column form of the row.
    pub fn to_record(&self) -> SequenceRow {
        match self {
            Self::Chat(text) => SequenceRow::chat(text),
            Self::Data(row) => row.clone(),
        }
    }
}

impl From<SequenceRow> for Row {
    fn from(record: SequenceRow) -> Self {
        if record.is_chat() {
            Self::Chat(record.description)
        } else {
            Self::Data(record)
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SequenceRow::deserialize(deserializer).map(Self::from)
    }
}

/// An ordered sequence table with at most one leading chat row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SequenceTable {
    rows: Vec<Row>,
}

impl SequenceTable {
    /// Build a table; a non-empty `chat` text becomes the first row.
    pub fn new(chat: Option<String>, data: Vec<SequenceRow>) -> Self {
        let mut rows = Vec::with_capacity(data.len().saturating_add(1));
        if let Some(text) = chat.filter(|t| !t.is_empty()) {
            rows.push(Row::Chat(text));
        }
        rows.extend(data.into_iter().map(Row::Data));
        Self { rows }
    }

    /// A table holding only a chat row.
    pub fn chat_only(text: &str) -> Self {
        Self {
            rows: vec![Row::Chat(text.to_owned())],
        }
    }

    /// All rows, chat row first when present.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Text of the chat row.
    pub fn chat_text(&self) -> Option<&str> {
        match self.rows.first() {
            Some(Row::Chat(text)) => Some(text),
            _ => None,
        }
    }

    /// Instruction rows, in order.
    pub fn data_rows(&self) -> impl Iterator<Item = &SequenceRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::Data(data) => Some(data),
            Row::Chat(_) => None,
        })
    }

    /// Number of instruction rows.
    pub fn data_len(&self) -> usize {
        self.data_rows().count()
    }

    /// True when the table carries no instruction rows.
    pub fn is_conversational(&self) -> bool {
        self.data_len() == 0
    }

    /// Seven-column records, chat row first when present.
    pub fn to_records(&self) -> Vec<SequenceRow> {
        self.rows.iter().map(Row::to_record).collect()
    }
}

static ERROR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r#"(?i)error["']?\s*:\s*["']([^"']+)["']"#,
        r#"(?i)message["']?\s*:\s*["']([^"']+)["']"#,
        r"ERROR:\s*(.+?)(?:\n|$)",
        r"Exception:\s*(.+?)(?:\n|$)",
    ])
});

/// Pull a readable error message out of an API error body.
///
/// Returns an empty string when no known error shape is found.
pub fn extract_error_message(response_text: &str) -> String {
    ERROR_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(response_text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .unwrap_or_default()
}
