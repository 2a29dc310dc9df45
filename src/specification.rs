//! Spring specification value types.
//!
//! A [`SpringSpecification`] is a plain value: every update returns a new
//! specification instead of mutating shared state, and the caller decides
//! where to persist it.

use serde::{Deserialize, Serialize};

use crate::parser::pdf_text::{canonical_field_line, canonical_load_line, canonical_position_line};
use crate::parser::{FieldValue, ParsedFieldSet};
use crate::patterns::{SpecField, DEFAULT_TOLERANCE_PERCENT};

/// Errors from index-addressed set-point operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpecificationError {
    /// The set-point index does not exist.
    #[error("set point {index} out of range (specification has {len})")]
    SetPointOutOfRange {
        /// Requested zero-based index.
        index: usize,
        /// Number of set points in the specification.
        len: usize,
    },
}

/// Length unit of a specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimeters.
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    /// Inches.
    #[serde(rename = "inch")]
    Inch,
}

impl LengthUnit {
    /// Symbol used in prompt text.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Inch => "inch",
        }
    }
}

/// A (position, load, tolerance) requirement at one deflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPoint {
    /// Position in specification length units.
    pub position_mm: f64,
    /// Load in newtons.
    pub load_n: f64,
    /// Load tolerance in percent.
    #[serde(default = "default_tolerance")]
    pub tolerance_percent: f64,
    /// Whether the set point takes part in generated sequences.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl SetPoint {
    /// A set point with the default tolerance, enabled.
    pub fn new(position_mm: f64, load_n: f64) -> Self {
        Self {
            position_mm,
            load_n,
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            enabled: true,
        }
    }
}

impl Default for SetPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_PERCENT
}

fn default_true() -> bool {
    true
}

/// Geometry, identity and set points of the spring under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSpecification {
    /// Part name.
    pub part_name: String,
    /// Part number.
    pub part_number: String,
    /// Numeric part id.
    pub part_id: i64,
    /// Free length.
    pub free_length_mm: f64,
    /// Number of coils.
    pub coil_count: f64,
    /// Wire diameter.
    pub wire_dia_mm: f64,
    /// Outer diameter.
    pub outer_dia_mm: f64,
    /// Set points, addressed by position in this list.
    pub set_points: Vec<SetPoint>,
    /// Safety load limit in newtons.
    pub safety_limit_n: f64,
    /// Length unit.
    pub unit: LengthUnit,
    /// Whether the specification is used when building prompts.
    pub enabled: bool,
}

impl Default for SpringSpecification {
    fn default() -> Self {
        Self {
            part_name: "Demo Spring".to_owned(),
            part_number: "Demo Spring-1".to_owned(),
            part_id: 28,
            free_length_mm: 58.0,
            coil_count: 7.5,
            wire_dia_mm: 3.0,
            outer_dia_mm: 32.0,
            set_points: vec![
                SetPoint::new(40.0, 23.6),
                SetPoint::new(33.0, 34.14),
                SetPoint::new(28.0, 42.36),
            ],
            safety_limit_n: 300.0,
            unit: LengthUnit::Millimeter,
            enabled: true,
        }
    }
}

impl SpringSpecification {
    /// Copy with a default set point appended.
    pub fn with_set_point_added(&self) -> Self {
        let mut next = self.clone();
        next.set_points.push(SetPoint::default());
        next
    }

    /// Copy with the set point at `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::SetPointOutOfRange`] if `index` does not exist.
    pub fn with_set_point_updated(
        &self,
        index: usize,
        set_point: SetPoint,
    ) -> Result<Self, SpecificationError> {
        let mut next = self.clone();
        let len = next.set_points.len();
        let slot = next
            .set_points
            .get_mut(index)
            .ok_or(SpecificationError::SetPointOutOfRange { index, len })?;
        *slot = set_point;
        Ok(next)
    }

    /// Copy with the set point at `index` removed; later set points shift down.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::SetPointOutOfRange`] if `index` does not exist.
    pub fn with_set_point_removed(&self, index: usize) -> Result<Self, SpecificationError> {
        let len = self.set_points.len();
        if index >= len {
            return Err(SpecificationError::SetPointOutOfRange { index, len });
        }
        let mut next = self.clone();
        next.set_points.remove(index);
        Ok(next)
    }

    /// Copy with every recognized field of `parsed` applied.
    ///
    /// Basic fields overwrite. The set-point list grows with default set
    /// points to at most as many entries as were parsed; each parsed set
    /// point then replaces the one at its index, and one whose index is
    /// still out of range is skipped. Any parsed basic field enables the
    /// specification.
    pub fn apply_parsed(&self, parsed: &ParsedFieldSet) -> Self {
        let mut next = self.clone();

        for (field, value) in &parsed.basic_info {
            next.apply_field(*field, value);
        }
        if !parsed.basic_info.is_empty() {
            next.enabled = true;
        }

        if next.set_points.len() < parsed.set_points.len() {
            next.set_points.resize_with(parsed.set_points.len(), SetPoint::default);
        }
        for point in parsed.set_points.values() {
            let Some(slot) = next.set_points.get_mut(point.index) else {
                tracing::debug!(index = point.index, "parsed set point beyond list, skipping");
                continue;
            };
            *slot = SetPoint {
                position_mm: point.position,
                load_n: point.load,
                tolerance_percent: point.tolerance,
                enabled: point.enabled,
            };
        }
        next
    }

    fn apply_field(&mut self, field: SpecField, value: &FieldValue) {
        match (field, value) {
            (SpecField::PartName, FieldValue::Text(s)) => self.part_name.clone_from(s),
            (SpecField::PartNumber, FieldValue::Text(s)) => self.part_number.clone_from(s),
            (SpecField::PartId, FieldValue::Integer(i)) => self.part_id = *i,
            (SpecField::FreeLength, FieldValue::Number(n)) => self.free_length_mm = *n,
            (SpecField::CoilCount, FieldValue::Number(n)) => self.coil_count = *n,
            (SpecField::WireDiameter, FieldValue::Number(n)) => self.wire_dia_mm = *n,
            (SpecField::OuterDiameter, FieldValue::Number(n)) => self.outer_dia_mm = *n,
            (SpecField::SafetyLimit, FieldValue::Number(n)) => self.safety_limit_n = *n,
            (field, value) => {
                tracing::debug!(?field, ?value, "ignoring field value of unexpected type");
            }
        }
    }

    /// Render the specification as the labelled block used in prompts.
    ///
    /// Only enabled set points are listed; numbering follows list position.
    pub fn to_prompt_text(&self) -> String {
        let mut lines = vec![
            "Spring Specifications:".to_owned(),
            canonical_field_line(SpecField::PartName, &self.part_name),
            canonical_field_line(SpecField::PartNumber, &self.part_number),
            canonical_field_line(SpecField::PartId, &self.part_id.to_string()),
            canonical_field_line(SpecField::FreeLength, &self.free_length_mm.to_string()),
            canonical_field_line(SpecField::CoilCount, &self.coil_count.to_string()),
            canonical_field_line(SpecField::WireDiameter, &self.wire_dia_mm.to_string()),
            canonical_field_line(SpecField::OuterDiameter, &self.outer_dia_mm.to_string()),
        ];

        for (number, point) in (1..).zip(&self.set_points) {
            if point.enabled {
                lines.push(canonical_position_line(number, &point.position_mm.to_string()));
                lines.push(canonical_load_line(
                    number,
                    &point.load_n.to_string(),
                    &point.tolerance_percent.to_string(),
                ));
            }
        }

        lines.push(canonical_field_line(
            SpecField::SafetyLimit,
            &self.safety_limit_n.to_string(),
        ));
        lines.push(format!("Unit: {}", self.unit.symbol()));
        lines.join("\n") + "\n"
    }
}
