use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonResult, DiffClass, Presence};
use crate::errors::Result;
use crate::ops::LayoutStore;

/// One changed component; "old" is always the golden side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub reference_id: String,
    pub old_value: String,
    pub old_unit: String,
    pub new_value: String,
    pub new_unit: String,
    pub class: DiffClass,
}

/// A component present in only one layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedRow {
    pub reference_id: String,
    pub presence: Presence,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffColumn {
    ReferenceId,
    OldValue,
    OldUnit,
    NewValue,
    NewUnit,
}

impl DiffColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffColumn::ReferenceId => "reference",
            DiffColumn::OldValue => "old-value",
            DiffColumn::OldUnit => "old-unit",
            DiffColumn::NewValue => "new-value",
            DiffColumn::NewUnit => "new-unit",
        }
    }

    fn key(self, row: &DiffRow) -> &str {
        match self {
            DiffColumn::ReferenceId => &row.reference_id,
            DiffColumn::OldValue => &row.old_value,
            DiffColumn::OldUnit => &row.old_unit,
            DiffColumn::NewValue => &row.new_value,
            DiffColumn::NewUnit => &row.new_unit,
        }
    }
}

impl fmt::Display for DiffColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "reference" | "ref" | "referenceid" => Ok(DiffColumn::ReferenceId),
            "old-value" => Ok(DiffColumn::OldValue),
            "old-unit" => Ok(DiffColumn::OldUnit),
            "new-value" => Ok(DiffColumn::NewValue),
            "new-unit" => Ok(DiffColumn::NewUnit),
            other => Err(format!(
                "unknown column '{}': expected reference, old-value, old-unit, new-value or new-unit",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Differences table: changed shared components plus the unmatched list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffTable {
    pub rows: Vec<DiffRow>,
    pub unmatched: Vec<UnmatchedRow>,
}

impl DiffTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-sort rows in place by a column
    ///
    /// Equal keys fall back to ascending reference order, so the result is
    /// the same whatever order the rows were in before.
    pub fn sort_by(&mut self, column: DiffColumn, order: SortOrder) {
        self.rows.sort_by(|a, b| {
            let primary = column.key(a).cmp(column.key(b));
            let primary = match order {
                SortOrder::Ascending => primary,
                SortOrder::Descending => primary.reverse(),
            };
            primary.then_with(|| a.reference_id.cmp(&b.reference_id))
        });
    }
}

/// Build the differences table from a valid comparison
///
/// Rows are the non-`None` classifications in reference order. Values come
/// from the stores as they are now, so rebuild after any edit.
///
/// # Errors
///
/// - `StructuralMismatch` if the comparison failed validation
/// - `RecordNotFound` if a store no longer matches the comparison
pub fn build_diff_table(
    result: &ComparisonResult,
    golden: &LayoutStore,
    under_test: &LayoutStore,
) -> Result<DiffTable> {
    result.ensure_valid()?;

    let mut rows = Vec::new();
    for (id, class) in &result.classifications {
        if !class.is_changed() {
            continue;
        }
        let old = golden.get(id)?;
        let new = under_test.get(id)?;
        rows.push(DiffRow {
            reference_id: id.clone(),
            old_value: old.value.clone(),
            old_unit: old.unit.clone(),
            new_value: new.value.clone(),
            new_unit: new.unit.clone(),
            class: *class,
        });
    }

    let mut unmatched = Vec::new();
    for (id, presence) in &result.one_sided {
        let side = match presence {
            Presence::OnlyInGolden => golden,
            Presence::OnlyInUnderTest => under_test,
        };
        let record = side.get(id)?;
        unmatched.push(UnmatchedRow {
            reference_id: id.clone(),
            presence: *presence,
            value: record.value.clone(),
            unit: record.unit.clone(),
        });
    }

    Ok(DiffTable { rows, unmatched })
}
