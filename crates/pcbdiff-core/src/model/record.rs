use serde::{Deserialize, Serialize};

use super::component::ComponentType;

/// One row of the placement table as read from file, before validation
///
/// Every field is optional text. Column names follow the tabular format
/// `ReferenceID, X, Y, Angle, Value, Unit`; `Ref` is accepted for the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "ReferenceID", alias = "Ref", default)]
    pub reference_id: Option<String>,
    #[serde(rename = "X", default)]
    pub x: Option<String>,
    #[serde(rename = "Y", default)]
    pub y: Option<String>,
    #[serde(rename = "Angle", default)]
    pub angle: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
}

impl RawRow {
    /// Convenience constructor from six text cells, blank cells become `None`
    pub fn from_cells(
        reference_id: &str,
        x: &str,
        y: &str,
        angle: &str,
        value: &str,
        unit: &str,
    ) -> Self {
        fn cell(text: &str) -> Option<String> {
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Self {
            reference_id: cell(reference_id),
            x: cell(x),
            y: cell(y),
            angle: cell(angle),
            value: cell(value),
            unit: cell(unit),
        }
    }
}

/// Why a row did not become a placed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    MissingReference,
    MissingX,
    MissingY,
    MalformedX,
    MalformedY,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::MissingReference => "missing reference",
            SkipReason::MissingX => "missing X",
            SkipReason::MissingY => "missing Y",
            SkipReason::MalformedX => "non-numeric X",
            SkipReason::MalformedY => "non-numeric Y",
        }
    }
}

/// Result of turning a raw row into a record
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Placed(Record),
    Skipped(SkipReason),
}

/// Parsed state of a numeric cell
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumericField {
    Missing,
    Malformed(String),
    Value(f64),
}

/// Parse a numeric cell; blank is missing, non-finite counts as malformed
pub(crate) fn parse_numeric(cell: Option<&str>) -> NumericField {
    let Some(text) = cell.map(str::trim) else {
        return NumericField::Missing;
    };
    if text.is_empty() {
        return NumericField::Missing;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => NumericField::Value(v),
        _ => NumericField::Malformed(text.to_string()),
    }
}

fn trimmed(cell: &Option<String>) -> String {
    cell.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// One placed component
///
/// `x`/`y` are nominal placement coordinates in file units. `angle` is in
/// degrees; positive angles turn clockwise on screen (see the geometry
/// module). `value` and `unit` are compared as text; a blank unit is a valid
/// value distinct from any non-blank unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub reference_id: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub value: String,
    pub unit: String,
}

impl Record {
    /// Create a record from already-validated fields
    pub fn new(
        reference_id: impl Into<String>,
        x: f64,
        y: f64,
        angle: f64,
        value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            reference_id: reference_id.into(),
            x,
            y,
            angle,
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Validate a raw row
    ///
    /// Rows without a reference or without numeric X and Y are skipped.
    /// A missing or non-numeric angle becomes 0. A missing unit stays blank;
    /// the type's default unit is never filled in here.
    pub fn from_row(row: &RawRow) -> RowOutcome {
        let reference_id = trimmed(&row.reference_id);
        if reference_id.is_empty() {
            return RowOutcome::Skipped(SkipReason::MissingReference);
        }

        let x = match parse_numeric(row.x.as_deref()) {
            NumericField::Value(v) => v,
            NumericField::Missing => return RowOutcome::Skipped(SkipReason::MissingX),
            NumericField::Malformed(_) => return RowOutcome::Skipped(SkipReason::MalformedX),
        };
        let y = match parse_numeric(row.y.as_deref()) {
            NumericField::Value(v) => v,
            NumericField::Missing => return RowOutcome::Skipped(SkipReason::MissingY),
            NumericField::Malformed(_) => return RowOutcome::Skipped(SkipReason::MalformedY),
        };
        let angle = match parse_numeric(row.angle.as_deref()) {
            NumericField::Value(v) => v,
            NumericField::Missing | NumericField::Malformed(_) => 0.0,
        };

        RowOutcome::Placed(Self {
            reference_id,
            x,
            y,
            angle,
            value: trimmed(&row.value),
            unit: trimmed(&row.unit),
        })
    }

    /// Component type, inferred from the reference on every call
    pub fn component_type(&self) -> ComponentType {
        ComponentType::infer(&self.reference_id)
    }

    /// Default unit for this record's type (edit form seed only)
    pub fn default_unit(&self) -> &'static str {
        self.component_type().default_unit()
    }

    /// Raw placement coordinates
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Canvas label: `"C1 100nF"` when value and unit are both set, else the reference
    pub fn label(&self) -> String {
        if !self.value.is_empty() && !self.unit.is_empty() {
            format!("{} {}{}", self.reference_id, self.value, self.unit)
        } else {
            self.reference_id.clone()
        }
    }

    /// Output row in the six-field tabular format
    ///
    /// Numbers use the shortest text that parses back to the same value, so
    /// a saved file reloads into an identical record.
    pub fn to_row(&self) -> RawRow {
        RawRow {
            reference_id: Some(self.reference_id.clone()),
            x: Some(self.x.to_string()),
            y: Some(self.y.to_string()),
            angle: Some(self.angle.to_string()),
            value: Some(self.value.clone()),
            unit: Some(self.unit.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(row: RawRow) -> Record {
        match Record::from_row(&row) {
            RowOutcome::Placed(r) => r,
            RowOutcome::Skipped(reason) => panic!("row skipped: {:?}", reason),
        }
    }

    #[test]
    fn test_full_row() {
        let r = placed(RawRow::from_cells("C1", "1200", "3100", "90", "100", "nF"));
        assert_eq!(r.reference_id, "C1");
        assert_eq!(r.position(), (1200.0, 3100.0));
        assert_eq!(r.angle, 90.0);
        assert_eq!(r.value, "100");
        assert_eq!(r.unit, "nF");
        assert_eq!(r.component_type(), ComponentType::Capacitor);
    }

    #[test]
    fn test_missing_x_is_skipped() {
        let row = RawRow::from_cells("X9", "", "100", "0", "5", "V");
        assert_eq!(
            Record::from_row(&row),
            RowOutcome::Skipped(SkipReason::MissingX)
        );
    }

    #[test]
    fn test_malformed_y_is_skipped() {
        let row = RawRow::from_cells("R1", "10", "abc", "0", "", "");
        assert_eq!(
            Record::from_row(&row),
            RowOutcome::Skipped(SkipReason::MalformedY)
        );
    }

    #[test]
    fn test_non_finite_coordinate_is_malformed() {
        let row = RawRow::from_cells("R1", "NaN", "1", "0", "", "");
        assert_eq!(
            Record::from_row(&row),
            RowOutcome::Skipped(SkipReason::MalformedX)
        );
    }

    #[test]
    fn test_blank_reference_is_skipped() {
        let row = RawRow::from_cells("  ", "1", "1", "0", "", "");
        assert_eq!(
            Record::from_row(&row),
            RowOutcome::Skipped(SkipReason::MissingReference)
        );
    }

    #[test]
    fn test_angle_defaults_to_zero() {
        let missing = placed(RawRow::from_cells("R1", "1", "2", "", "", ""));
        assert_eq!(missing.angle, 0.0);
        let malformed = placed(RawRow::from_cells("R1", "1", "2", "ninety", "", ""));
        assert_eq!(malformed.angle, 0.0);
    }

    #[test]
    fn test_blank_unit_is_not_defaulted() {
        let r = placed(RawRow::from_cells("C4", "1", "2", "0", "10", ""));
        assert_eq!(r.unit, "");
        assert_eq!(r.default_unit(), "nF");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let r = placed(RawRow::from_cells(" L2 ", " 500 ", "500", "0", " 33 ", " nH "));
        assert_eq!(r.reference_id, "L2");
        assert_eq!(r.x, 500.0);
        assert_eq!(r.value, "33");
        assert_eq!(r.unit, "nH");
    }

    #[test]
    fn test_label() {
        assert_eq!(Record::new("C1", 0.0, 0.0, 0.0, "100", "nF").label(), "C1 100nF");
        assert_eq!(Record::new("C1", 0.0, 0.0, 0.0, "100", "").label(), "C1");
        assert_eq!(Record::new("U1", 0.0, 0.0, 0.0, "", "").label(), "U1");
    }

    #[test]
    fn test_to_row_reparses_identically() {
        let r = Record::new("R7", 0.1 + 0.2, -12.5, 270.0, "4.7", "kOhms");
        assert_eq!(placed(r.to_row()), r);
    }
}
