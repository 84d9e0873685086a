use serde::{Deserialize, Serialize};

use super::component::ComponentType;
use super::record::{parse_numeric, NumericField, Record};
use super::units::{normalize_unit, split_value_unit};
use crate::errors::{PcbDiffError, Result};

/// Fields shown in the edit dialog for one record
///
/// `unit` is seeded with the type's default unit only when the record's
/// own unit is blank; the record itself is not changed by building a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    pub reference_id: String,
    pub component_type: ComponentType,
    pub value: String,
    pub unit: String,
    pub angle: String,
    pub x: String,
    pub y: String,
}

impl EditForm {
    pub fn for_record(record: &Record) -> Self {
        let unit = if record.unit.is_empty() {
            record.default_unit().to_string()
        } else {
            record.unit.clone()
        };
        Self {
            reference_id: record.reference_id.clone(),
            component_type: record.component_type(),
            value: record.value.clone(),
            unit,
            angle: record.angle.to_string(),
            x: record.x.to_string(),
            y: record.y.to_string(),
        }
    }

    /// Turn the submitted form into an update request
    pub fn into_update(self) -> RecordUpdate {
        RecordUpdate {
            x: Some(self.x),
            y: Some(self.y),
            angle: Some(self.angle),
            value: Some(self.value),
            unit: Some(self.unit),
            component_type: None,
        }
    }
}

/// Requested change to one record, as loosely-typed text input
///
/// `None` leaves a field untouched. Choosing a `component_type` without an
/// explicit `unit` resets the unit to that type's default unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub x: Option<String>,
    pub y: Option<String>,
    pub angle: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub component_type: Option<ComponentType>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = Some(x.into());
        self.y = Some(y.into());
        self
    }

    pub fn with_angle(mut self, angle: impl Into<String>) -> Self {
        self.angle = Some(angle.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set value and unit from combined text such as `"220nF"`
    pub fn with_value_text(mut self, text: &str) -> Self {
        let (value, unit) = split_value_unit(text);
        self.value = Some(value);
        if !unit.is_empty() {
            self.unit = Some(unit);
        }
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    /// True when the request would not touch any field
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.angle.is_none()
            && self.value.is_none()
            && self.unit.is_none()
            && self.component_type.is_none()
    }

    /// Check the request against the load rules for the given record
    ///
    /// # Errors
    ///
    /// - `MissingCoordinate` if X or Y is supplied but blank
    /// - `MalformedCoordinate` if X or Y is supplied but not a finite number
    ///
    /// A malformed angle is not an error; it falls back to 0.
    pub fn validate(&self, reference_id: &str) -> Result<ValidatedUpdate> {
        let x = validate_coordinate(reference_id, "X", self.x.as_deref())?;
        let y = validate_coordinate(reference_id, "Y", self.y.as_deref())?;
        let angle = self.angle.as_deref().map(|text| match parse_numeric(Some(text)) {
            NumericField::Value(v) => v,
            NumericField::Missing | NumericField::Malformed(_) => 0.0,
        });
        let value = self.value.as_deref().map(|v| v.trim().to_string());
        let unit = match (&self.unit, self.component_type) {
            (Some(u), _) => Some(normalize_unit(u)),
            (None, Some(ty)) => Some(ty.default_unit().to_string()),
            (None, None) => None,
        };
        Ok(ValidatedUpdate {
            x,
            y,
            angle,
            value,
            unit,
        })
    }
}

fn validate_coordinate(reference_id: &str, field: &str, cell: Option<&str>) -> Result<Option<f64>> {
    let Some(text) = cell else {
        return Ok(None);
    };
    match parse_numeric(Some(text)) {
        NumericField::Value(v) => Ok(Some(v)),
        NumericField::Missing => Err(PcbDiffError::MissingCoordinate {
            reference_id: reference_id.to_string(),
            field: field.to_string(),
        }),
        NumericField::Malformed(raw) => Err(PcbDiffError::MalformedCoordinate {
            reference_id: reference_id.to_string(),
            field: field.to_string(),
            raw,
        }),
    }
}

/// A checked update, ready to apply without further failure
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub angle: Option<f64>,
    pub value: Option<String>,
    pub unit: Option<String>,
}

impl ValidatedUpdate {
    /// Apply to a record, returning true when the position changed
    pub fn apply_to(&self, record: &mut Record) -> bool {
        let before = record.position();
        if let Some(x) = self.x {
            record.x = x;
        }
        if let Some(y) = self.y {
            record.y = y;
        }
        if let Some(angle) = self.angle {
            record.angle = angle;
        }
        if let Some(value) = &self.value {
            record.value = value.clone();
        }
        if let Some(unit) = &self.unit {
            record.unit = unit.clone();
        }
        record.position() != before
    }
}
