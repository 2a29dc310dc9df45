//! Sequence-request intent detection.
//!
//! Layered keyword heuristics, checked in priority order:
//! 1. explicit sequence-request phrasing
//! 2. the word "test" together with a compression or tension keyword
//! 3. conversational openers and closers (always a "no")
//! 4. two or more engineering parameters mentioned

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::patterns::{compile_all, PARAMETER_PATTERNS};

/// Minimum number of distinct parameters that makes a message an implicit request.
const MIN_IMPLICIT_PARAMETERS: usize = 2;

static SEQUENCE_REQUEST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"(?i)\b(?:generat|creat|mak)(?:e|ing)?\s+(?:(?:a|the|new)\s+)?(?:test\s+)?sequence",
        r"(?i)\b(?:test|testing)\s+sequence",
        r"(?i)\bsequence\s+for\b",
        r"(?i)\bspring\s+test",
        r"(?i)\bcompression\s+test",
        r"(?i)\btension\s+test",
        r"(?i)\b(?:displacement|deflection|height)\s+test",
        r"(?i)\bmeasur(?:e|ing)\s+(?:(?:a|the)\s+)?spring",
    ])
});

static TEST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btest").expect("valid regex"));

static TEST_TYPE_HINT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        // compression
        r"(?i)\b(?:compress(?:ion)?|push(?:ing)?|deflect(?:ion)?|deformation)",
        // tension
        r"(?i)\b(?:tens(?:ion)?|extend(?:ing)?|pull(?:ing)?|stretch(?:ing)?|extension)",
    ])
});

static CONVERSATIONAL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"(?i)^\s*(?:hi|hello|hey|greetings)\b",
        r"(?i)^\s*(?:how are you|what can you do|who are you)",
        r"(?i)\b(?:explain|tell me about|what is|how does)\b",
        r"(?i)\b(?:thanks|thank you|good job)\b",
        r"^\s*\?+\s*$",
    ])
});

/// Decide whether `text` asks for a new test sequence.
pub fn is_sequence_request(text: &str) -> bool {
    if SEQUENCE_REQUEST.iter().any(|re| re.is_match(text)) {
        debug!("explicit sequence request");
        return true;
    }

    if TEST_WORD.is_match(text) && TEST_TYPE_HINT.iter().any(|re| re.is_match(text)) {
        debug!("test keyword with test-type hint");
        return true;
    }

    if CONVERSATIONAL.iter().any(|re| re.is_match(text)) {
        return false;
    }

    let mentioned = PARAMETER_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(text))
        .count();
    debug!(mentioned, "parameter mentions");
    mentioned >= MIN_IMPLICIT_PARAMETERS
}
