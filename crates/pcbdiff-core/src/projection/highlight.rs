use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonResult, DiffClass};
use crate::errors::Result;
use crate::ops::LayoutStore;

/// Colour class a renderer applies to one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightClass {
    Default,
    Value,
    Unit,
    Both,
    /// No counterpart in the other layout
    Unmatched,
}

impl HighlightClass {
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightClass::Default => "",
            HighlightClass::Value => "value",
            HighlightClass::Unit => "unit",
            HighlightClass::Both => "both",
            HighlightClass::Unmatched => "unmatched",
        }
    }
}

impl From<DiffClass> for HighlightClass {
    fn from(class: DiffClass) -> Self {
        match class {
            DiffClass::None => HighlightClass::Default,
            DiffClass::ValueMismatch => HighlightClass::Value,
            DiffClass::UnitMismatch => HighlightClass::Unit,
            DiffClass::Both => HighlightClass::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHighlight {
    pub reference_id: String,
    pub class: HighlightClass,
}

/// Highlight class for every record of the store being viewed
///
/// `viewed` is whichever layout the caller is drawing; classification does
/// not depend on it, only the set of records does. Output follows store order.
///
/// # Errors
///
/// Returns `StructuralMismatch` if the comparison failed validation.
pub fn highlight_classes(result: &ComparisonResult, viewed: &LayoutStore) -> Result<Vec<RecordHighlight>> {
    result.ensure_valid()?;
    Ok(viewed
        .reference_ids()
        .map(|id| {
            let class = match result.classification(id) {
                Some(c) => HighlightClass::from(c),
                None => HighlightClass::Unmatched,
            };
            RecordHighlight {
                reference_id: id.to_string(),
                class,
            }
        })
        .collect())
}
