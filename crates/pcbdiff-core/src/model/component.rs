use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component family inferred from the reference designator prefix
///
/// The type is never stored on a record. It is recomputed from the
/// `referenceId` on every access so it cannot go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Capacitor,
    Resistor,
    Inductor,
    Unknown,
}

impl ComponentType {
    /// All types in edit-form order
    pub const ALL: [ComponentType; 4] = [
        ComponentType::Resistor,
        ComponentType::Capacitor,
        ComponentType::Inductor,
        ComponentType::Unknown,
    ];

    /// Infer the type from the first character of a reference designator
    ///
    /// Matching is case-insensitive: `c12` and `C12` are both capacitors.
    /// Empty references and unrecognised prefixes yield `Unknown`.
    pub fn infer(reference_id: &str) -> Self {
        match reference_id
            .trim_start()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
        {
            Some('C') => ComponentType::Capacitor,
            Some('R') => ComponentType::Resistor,
            Some('L') => ComponentType::Inductor,
            _ => ComponentType::Unknown,
        }
    }

    /// Unit used to seed the edit form when a record has no unit
    pub fn default_unit(self) -> &'static str {
        match self {
            ComponentType::Capacitor => "nF",
            ComponentType::Resistor => "Ohms",
            ComponentType::Inductor => "nH",
            ComponentType::Unknown => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Capacitor => "Capacitor",
            ComponentType::Resistor => "Resistor",
            ComponentType::Inductor => "Inductor",
            ComponentType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "capacitor" => Ok(ComponentType::Capacitor),
            "resistor" => Ok(ComponentType::Resistor),
            "inductor" => Ok(ComponentType::Inductor),
            "unknown" => Ok(ComponentType::Unknown),
            other => Err(format!(
                "unknown component type '{}': expected Resistor, Capacitor, Inductor or Unknown",
                other
            )),
        }
    }
}
