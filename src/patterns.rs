//! Fixed domain vocabulary for spring-test text.
//!
//! Pure data: the 18-entry command set with its descriptions and standard
//! speeds, the sequence column names and their accepted synonyms, the field
//! label fragments for specification text, and the engineering-parameter
//! pattern table used on chat messages. Nothing here holds state; the
//! compiled regexes live in `LazyLock` statics and are shared by every caller.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel placed in the `Row` and `CMD` columns of the conversational row.
pub const CHAT_SENTINEL: &str = "CHAT";

/// Default marker opening the JSON part of a hybrid response.
pub const SEQUENCE_DATA_START: &str = "---SEQUENCE_DATA_START---";

/// Default marker closing the JSON part of a hybrid response.
pub const SEQUENCE_DATA_END: &str = "---SEQUENCE_DATA_END---";

/// Default set-point load tolerance in percent.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 10.0;

/// Unsigned decimal number capture shared by every numeric field pattern.
pub const NUMBER: &str = r"(\d+(?:\.\d+)?)";

/// Label fragment for free length, shared by the specification field table
/// and the chat parameter table.
pub const FREE_LENGTH_LABEL: &str = r"free\s*length";

/// Set-point label tolerant of the "Poni", "Poit", "Pont" and "Poii" typos.
pub const SET_POINT_LABEL: &str = r"set\s*(?:point|poit|poni|pont|poii)";

/// Separator between a set-point label and its index (`-1`, ` 1`, `: 1`).
pub const SET_POINT_SEPARATOR: &str = r"[ \t\-:]*";

// ---------------------------------------------------------------------------
// Sequence table columns
// ---------------------------------------------------------------------------

/// Row label column.
pub const COL_ROW: &str = "Row";
/// Command code column.
pub const COL_CMD: &str = "CMD";
/// Description column.
pub const COL_DESCRIPTION: &str = "Description";
/// Condition column.
pub const COL_CONDITION: &str = "Condition";
/// Unit column.
pub const COL_UNIT: &str = "Unit";
/// Tolerance column.
pub const COL_TOLERANCE: &str = "Tolerance";
/// Rotational speed column.
pub const COL_SPEED: &str = "Speed rpm";

/// The seven sequence columns in canonical order.
pub const COLUMNS: [&str; 7] = [
    COL_ROW,
    COL_CMD,
    COL_DESCRIPTION,
    COL_CONDITION,
    COL_UNIT,
    COL_TOLERANCE,
    COL_SPEED,
];

/// Column-name synonyms seen in model output, mapped to canonical names.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("row", COL_ROW),
    ("Cmd", COL_CMD),
    ("cmd", COL_CMD),
    ("Command", COL_CMD),
    ("command", COL_CMD),
    ("description", COL_DESCRIPTION),
    ("condition", COL_CONDITION),
    ("Units", COL_UNIT),
    ("unit", COL_UNIT),
    ("units", COL_UNIT),
    ("tolerance", COL_TOLERANCE),
    ("Speed", COL_SPEED),
    ("speed", COL_SPEED),
    ("Speed (rpm)", COL_SPEED),
    ("Speed RPM", COL_SPEED),
    ("speed rpm", COL_SPEED),
    ("rpm", COL_SPEED),
];

/// Resolve a column name to its canonical form.
///
/// Canonical names map to themselves; unknown names return `None`.
pub fn canonical_column(name: &str) -> Option<&'static str> {
    if let Some(canonical) = COLUMNS.iter().find(|c| **c == name) {
        return Some(canonical);
    }
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

// ---------------------------------------------------------------------------
// Command vocabulary
// ---------------------------------------------------------------------------

/// The instrument command set, with catalogue descriptions.
pub const COMMANDS: [(&str, &str); 18] = [
    ("ZF", "Zero Force"),
    ("ZD", "Zero Displacement"),
    ("TH", "Threshold (Search Contact)"),
    ("LP", "Loop"),
    ("Mv(P)", "Move to Position"),
    ("Calc", "Formula Calculation"),
    ("TD", "Time Delay"),
    ("PMsg", "User Message"),
    ("Fr(P)", "Force at Position"),
    ("FL(P)", "Measure Free Length"),
    ("Scrag", "Scragging"),
    ("SR", "Spring Rate"),
    ("PkF", "Measure Peak Force"),
    ("PkP", "Measure Peak Position"),
    ("Po(F)", "Position at Force"),
    ("Po(PkF)", "Position at Peak Force"),
    ("Mv(F)", "Move to Force"),
    ("PUi", "User Input"),
];

/// Descriptions written into normalized sequence rows.
///
/// These are the wordings the generation prompt asks for; they take
/// precedence over the catalogue text in [`COMMANDS`].
const SEQUENCE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("ZF", "Zero Force"),
    ("TH", "Search Contact"),
    ("FL(P)", "Measure Free Length-Position"),
    ("Mv(P)", "Move to Position"),
    ("Fr(P)", "Force @ Position"),
    ("Scrag", "Scragging"),
    ("TD", "Time Delay"),
    ("PMsg", "User Message"),
];

/// Standard rotational speeds per command (empty: no speed applies).
const STANDARD_SPEEDS: &[(&str, &str)] = &[
    ("ZF", "50"),
    ("ZD", "50"),
    ("TH", "50"),
    ("Mv(P)", "200"),
    ("TD", ""),
    ("PMsg", ""),
    ("Fr(P)", "100"),
    ("FL(P)", "100"),
    ("Scrag", "300"),
    ("SR", "100"),
    ("PkF", "100"),
    ("PkP", "100"),
    ("Po(F)", "100"),
    ("Mv(F)", "200"),
];

/// Speed used for commands without an entry in the speed table.
pub const DEFAULT_SPEED: &str = "100";

/// Command code whose description may carry an `L1`/`L2` position label.
pub const MOVE_TO_POSITION: &str = "Mv(P)";

/// Catalogue description of a command code.
pub fn command_description(code: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}

/// Description a normalized sequence row should carry for `code`.
pub fn sequence_description(code: &str) -> Option<&'static str> {
    SEQUENCE_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}

/// Standard rotational speed for `code`, falling back to [`DEFAULT_SPEED`].
pub fn standard_speed(code: &str) -> &'static str {
    STANDARD_SPEEDS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(DEFAULT_SPEED, |(_, speed)| *speed)
}

// ---------------------------------------------------------------------------
// Specification fields
// ---------------------------------------------------------------------------

/// How a captured field value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Trimmed string.
    Text,
    /// Integer.
    Integer,
    /// Floating point.
    Float,
}

/// Basic specification fields recognized in specification text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpecField {
    /// Part name.
    PartName,
    /// Part number.
    PartNumber,
    /// Numeric part id.
    PartId,
    /// Free length.
    FreeLength,
    /// Number of active coils.
    CoilCount,
    /// Wire diameter.
    WireDiameter,
    /// Outer diameter.
    OuterDiameter,
    /// Safety load limit.
    SafetyLimit,
}

/// One row of the field table: labels and value captures for a field.
struct FieldPatternRow {
    field: SpecField,
    /// Label matched at the start of a line.
    strict_label: &'static str,
    /// Label matched anywhere; words may be split by colons or line breaks.
    loose_label: &'static str,
    strict_value: &'static str,
    loose_value: &'static str,
}

const FIELD_TABLE: [FieldPatternRow; 8] = [
    FieldPatternRow {
        field: SpecField::PartName,
        strict_label: r"(?:part|spring)[ \t]*name",
        loose_label: r"(?:part|spring)[\s:]+name",
        strict_value: r"([^\s:=][^\n]*)",
        loose_value: r"([^,;\n\d]+)",
    },
    FieldPatternRow {
        field: SpecField::PartNumber,
        strict_label: r"part[ \t]*(?:number|no\.?|#)",
        loose_label: r"(?:part|spring)[\s:]+(?:number|no\.?|#)",
        strict_value: r"([^\s:=][^\n]*)",
        loose_value: r"([^,;\n]+)",
    },
    FieldPatternRow {
        field: SpecField::PartId,
        strict_label: r"(?:part[ \t]*)?id",
        loose_label: r"\bid",
        strict_value: r"(\d+)",
        loose_value: r"(\d+)",
    },
    FieldPatternRow {
        field: SpecField::FreeLength,
        strict_label: FREE_LENGTH_LABEL,
        loose_label: r"free[\s:]+length",
        strict_value: NUMBER,
        loose_value: NUMBER,
    },
    FieldPatternRow {
        field: SpecField::CoilCount,
        strict_label: r"(?:no\.?|number)[ \t]*of[ \t]*(?:coils|colis)",
        loose_label: r"(?:no\.?|number)[\s:]+of[\s:]+(?:coils|colis)",
        strict_value: NUMBER,
        loose_value: NUMBER,
    },
    FieldPatternRow {
        field: SpecField::WireDiameter,
        strict_label: r"wired?[ \t]*dia(?:meter)?\.?",
        loose_label: r"wired?[\s:]+dia(?:meter)?\.?",
        strict_value: NUMBER,
        loose_value: NUMBER,
    },
    FieldPatternRow {
        field: SpecField::OuterDiameter,
        strict_label: r"(?:od|outer[ \t]*dia(?:meter)?\.?)",
        loose_label: r"\b(?:od|outer[\s:]+dia(?:meter)?\.?)",
        strict_value: NUMBER,
        loose_value: NUMBER,
    },
    FieldPatternRow {
        field: SpecField::SafetyLimit,
        strict_label: r"safety[ \t]*limit",
        loose_label: r"safety[\s:]+limit",
        strict_value: NUMBER,
        loose_value: NUMBER,
    },
];

impl SpecField {
    /// Every field, in extraction and rendering order.
    pub const ALL: [SpecField; 8] = [
        SpecField::PartName,
        SpecField::PartNumber,
        SpecField::PartId,
        SpecField::FreeLength,
        SpecField::CoilCount,
        SpecField::WireDiameter,
        SpecField::OuterDiameter,
        SpecField::SafetyLimit,
    ];

    /// Canonical label used when re-serializing specification text.
    pub fn label(self) -> &'static str {
        match self {
            Self::PartName => "Part Name",
            Self::PartNumber => "Part Number",
            Self::PartId => "ID",
            Self::FreeLength => "Free Length",
            Self::CoilCount => "No of Coils",
            Self::WireDiameter => "Wire Dia",
            Self::OuterDiameter => "OD",
            Self::SafetyLimit => "Safety limit",
        }
    }

    /// Unit suffix appended after the value in canonical text.
    pub fn unit_suffix(self) -> Option<&'static str> {
        match self {
            Self::FreeLength | Self::WireDiameter | Self::OuterDiameter => Some("mm"),
            Self::SafetyLimit => Some("N"),
            Self::PartName | Self::PartNumber | Self::PartId | Self::CoilCount => None,
        }
    }

    /// How the captured value is coerced.
    pub fn coercion(self) -> Coercion {
        match self {
            Self::PartName | Self::PartNumber => Coercion::Text,
            Self::PartId => Coercion::Integer,
            Self::FreeLength
            | Self::CoilCount
            | Self::WireDiameter
            | Self::OuterDiameter
            | Self::SafetyLimit => Coercion::Float,
        }
    }

    /// Pattern sources for this field, most specific first.
    ///
    /// The first is anchored at a line start and keeps label and value on
    /// one line. The second matches the label anywhere and lets colons and
    /// line breaks separate label words and value, as in PDF table layouts.
    pub fn pattern_sources(self) -> Vec<String> {
        FIELD_TABLE
            .iter()
            .filter(|row| row.field == self)
            .flat_map(|row| {
                [
                    format!(
                        r"(?im)^[ \t]*{}[ \t]*[:=]?[ \t]*{}",
                        row.strict_label, row.strict_value
                    ),
                    format!(r"(?i){}[\s:]*{}", row.loose_label, row.loose_value),
                ]
            })
            .collect()
    }
}

/// Compile crate-internal pattern sources, keeping their order.
///
/// Every source is a literal of this crate (or one with a number spliced
/// in) and is covered by tests, so a compile failure is a bug.
pub(crate) fn compile_all<S: AsRef<str>>(sources: &[S]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(source.as_ref()).expect("valid regex"))
        .collect()
}

/// A field or set-point label at the very start of a value.
///
/// A permissive pattern that crosses a line break after an empty label must
/// not take the next label as its value.
pub(crate) static FIELD_LABEL_START: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<&str> = FIELD_TABLE
        .iter()
        .map(|row| row.strict_label)
        .chain([SET_POINT_LABEL])
        .collect();
    Regex::new(&format!(r"(?i)^(?:{})\b", labels.join("|"))).expect("valid regex")
});

/// Label keywords before which a line break is inserted during preprocessing.
pub static FIELD_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[ \t]+((?:part|spring)[ \t]+name|part[ \t]+(?:number|no\b)|(?:part[ \t]+)?id:|free[ \t]+length|no\.?[ \t]+of[ \t]|number[ \t]+of[ \t]+co|wired?[ \t]|od:|outer[ \t]+dia|set[ \t]+po|safety)",
    )
    .expect("valid regex")
});

/// Lowercase fragments identifying a specification line.
///
/// Used by the line-filter fallback when no field pattern matches.
pub const LINE_KEYWORDS: [&str; 12] = [
    "part name",
    "part number",
    "id:",
    "free length",
    "coils",
    "colis",
    "wire dia",
    "wired",
    "od:",
    "set point",
    "set poni",
    "safety",
];

// ---------------------------------------------------------------------------
// Chat parameters
// ---------------------------------------------------------------------------

/// Whether a chat parameter keeps its text or is read as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Numeric value; raw text is kept when it fails to parse.
    Numeric,
    /// Identifier kept as trimmed text.
    Text,
}

/// One engineering parameter recognized in chat messages.
#[derive(Debug)]
pub struct ParameterPattern {
    /// Human-readable parameter name, used as the map key.
    pub name: &'static str,
    /// Value handling.
    pub kind: ParameterKind,
    /// Pattern with the value in capture group 1.
    pub regex: Regex,
}

/// Engineering-parameter patterns, in extraction order.
pub static PARAMETER_PATTERNS: LazyLock<Vec<ParameterPattern>> = LazyLock::new(|| {
    let rows: [(&'static str, ParameterKind, String); 11] = [
        (
            "Free Length",
            ParameterKind::Numeric,
            format!(r"(?i){FREE_LENGTH_LABEL}\s*(?:[=:]|is|of)?\s*(\d+\.?\d*)"),
        ),
        (
            "Part Number",
            ParameterKind::Text,
            r"(?i)\bpart\b\s*(?:number|#|no\.?)?\s*(?:[=:]|is)?\s*([A-Za-z0-9_\-]+)".to_owned(),
        ),
        (
            "Model Number",
            ParameterKind::Text,
            r"(?i)\bmodel\b\s*(?:number|#|no\.?)?\s*(?:[=:]|is)?\s*([A-Za-z0-9_\-]+)".to_owned(),
        ),
        (
            "Wire Diameter",
            ParameterKind::Numeric,
            r"(?i)\bwire\s*(?:diameter|thickness)?\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Outer Diameter",
            ParameterKind::Numeric,
            r"(?i)(?:outer|outside)\s*diameter\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Inner Diameter",
            ParameterKind::Numeric,
            r"(?i)(?:inner|inside)\s*diameter\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Spring Rate",
            ParameterKind::Numeric,
            r"(?i)(?:spring|target)\s*rate\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Test Load",
            ParameterKind::Numeric,
            r"(?i)(?:test|target)\s*load\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Deflection",
            ParameterKind::Numeric,
            r"(?i)deflection\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Working Length",
            ParameterKind::Numeric,
            r"(?i)working\s*length\s*(?:[=:]|is)?\s*(\d+\.?\d*)".to_owned(),
        ),
        (
            "Customer ID",
            ParameterKind::Text,
            r"(?i)\bcustomer\b\s*(?:id|number)?\s*(?:[=:]|is)?\s*([A-Za-z0-9\s]+)".to_owned(),
        ),
    ];

    rows.into_iter()
        .map(|(name, kind, source)| ParameterPattern {
            name,
            kind,
            regex: Regex::new(&source).expect("valid regex"),
        })
        .collect()
});

/// Words marking a compression test.
pub static COMPRESSION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:compress|compression|comp|compressive|pushing|push|pressing|press)\b",
    )
    .expect("valid regex")
});

/// Words marking a tension test.
pub static TENSION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:tens|tension|extension|extend|tensile|extending|pulling|pull|stretching|stretch)\b",
    )
    .expect("valid regex")
});
