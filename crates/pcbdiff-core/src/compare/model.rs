use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PcbDiffError, Result};

/// Field-level difference for a component present in both layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffClass {
    None,
    ValueMismatch,
    UnitMismatch,
    Both,
}

impl DiffClass {
    /// Classify from the two field comparisons
    pub fn from_flags(value_differs: bool, unit_differs: bool) -> Self {
        match (value_differs, unit_differs) {
            (false, false) => DiffClass::None,
            (true, false) => DiffClass::ValueMismatch,
            (false, true) => DiffClass::UnitMismatch,
            (true, true) => DiffClass::Both,
        }
    }

    pub fn is_changed(self) -> bool {
        self != DiffClass::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiffClass::None => "none",
            DiffClass::ValueMismatch => "value",
            DiffClass::UnitMismatch => "unit",
            DiffClass::Both => "both",
        }
    }
}

impl fmt::Display for DiffClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side holds a component that has no counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    OnlyInGolden,
    OnlyInUnderTest,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Presence::OnlyInGolden => "only in golden",
            Presence::OnlyInUnderTest => "only in unit under test",
        }
    }
}

/// First shared component found at different coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMismatch {
    pub reference_id: String,
    pub golden: (f64, f64),
    pub under_test: (f64, f64),
    /// `under_test - golden` per axis
    pub delta: (f64, f64),
}

impl CoordinateMismatch {
    pub fn new(reference_id: impl Into<String>, golden: (f64, f64), under_test: (f64, f64)) -> Self {
        Self {
            reference_id: reference_id.into(),
            golden,
            under_test,
            delta: (under_test.0 - golden.0, under_test.1 - golden.1),
        }
    }

    /// The same mismatch seen from the other side
    pub fn swapped(&self) -> Self {
        Self::new(self.reference_id.clone(), self.under_test, self.golden)
    }

    pub fn to_error(&self) -> PcbDiffError {
        PcbDiffError::StructuralMismatch {
            reference_id: self.reference_id.clone(),
            golden: self.golden,
            under_test: self.under_test,
        }
    }
}

/// Outcome of structural validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructuralCheck {
    Valid,
    Mismatch(CoordinateMismatch),
}

/// Projection of two stores at the moment of comparison
///
/// Never the source of truth: recompute it whenever either store changes.
/// When the structure is invalid both maps are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub structure: StructuralCheck,
    pub classifications: BTreeMap<String, DiffClass>,
    pub one_sided: BTreeMap<String, Presence>,
}

impl ComparisonResult {
    pub fn is_valid(&self) -> bool {
        matches!(self.structure, StructuralCheck::Valid)
    }

    pub fn mismatch(&self) -> Option<&CoordinateMismatch> {
        match &self.structure {
            StructuralCheck::Valid => None,
            StructuralCheck::Mismatch(m) => Some(m),
        }
    }

    /// # Errors
    ///
    /// Returns `StructuralMismatch` when validation failed.
    pub fn ensure_valid(&self) -> Result<()> {
        match self.mismatch() {
            None => Ok(()),
            Some(m) => Err(m.to_error()),
        }
    }

    pub fn classification(&self, reference_id: &str) -> Option<DiffClass> {
        self.classifications.get(reference_id).copied()
    }

    /// Number of shared components whose value or unit differs
    pub fn changed_count(&self) -> usize {
        self.classifications
            .values()
            .filter(|c| c.is_changed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_covers_four_cases() {
        assert_eq!(DiffClass::from_flags(false, false), DiffClass::None);
        assert_eq!(DiffClass::from_flags(true, false), DiffClass::ValueMismatch);
        assert_eq!(DiffClass::from_flags(false, true), DiffClass::UnitMismatch);
        assert_eq!(DiffClass::from_flags(true, true), DiffClass::Both);
    }

    #[test]
    fn test_mismatch_delta_and_swap() {
        let m = CoordinateMismatch::new("L2", (500.0, 500.0), (500.0, 501.0));
        assert_eq!(m.delta, (0.0, 1.0));
        let s = m.swapped();
        assert_eq!(s.golden, (500.0, 501.0));
        assert_eq!(s.delta, (0.0, -1.0));
    }

    #[test]
    fn test_ensure_valid_surfaces_error() {
        let result = ComparisonResult {
            structure: StructuralCheck::Mismatch(CoordinateMismatch::new(
                "L2",
                (500.0, 500.0),
                (500.0, 501.0),
            )),
            classifications: BTreeMap::new(),
            one_sided: BTreeMap::new(),
        };
        assert!(!result.is_valid());
        assert!(matches!(
            result.ensure_valid(),
            Err(PcbDiffError::StructuralMismatch { ref reference_id, .. }) if reference_id == "L2"
        ));
    }
}
