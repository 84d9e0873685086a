use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use super::model::{ComparisonResult, CoordinateMismatch, DiffClass, Presence, StructuralCheck};
use crate::model::Record;
use crate::ops::LayoutStore;
use crate::{log_op_end, log_op_error, log_op_start};

/// Shared references in ascending order
fn shared_ids<'a>(golden: &'a LayoutStore, under_test: &LayoutStore) -> BTreeSet<&'a str> {
    golden
        .reference_ids()
        .filter(|id| under_test.contains(id))
        .collect()
}

/// Find the first shared component placed at different coordinates
///
/// Shared references are visited in ascending order, so swapping the
/// arguments reports the same reference with the coordinates swapped.
/// Coordinates must be exactly equal; there is no tolerance.
pub fn find_first_mismatch(golden: &LayoutStore, under_test: &LayoutStore) -> Option<CoordinateMismatch> {
    shared_ids(golden, under_test).into_iter().find_map(|id| {
        let a = golden.get(id).ok()?;
        let b = under_test.get(id).ok()?;
        if a.position() == b.position() {
            None
        } else {
            Some(CoordinateMismatch::new(id, a.position(), b.position()))
        }
    })
}

pub fn validate_structure(golden: &LayoutStore, under_test: &LayoutStore) -> StructuralCheck {
    match find_first_mismatch(golden, under_test) {
        None => StructuralCheck::Valid,
        Some(m) => StructuralCheck::Mismatch(m),
    }
}

/// Classify one shared component; blank unit equals blank unit
pub fn classify(golden: &Record, under_test: &Record) -> DiffClass {
    DiffClass::from_flags(golden.value != under_test.value, golden.unit != under_test.unit)
}

/// Validate structure, then classify every shared component
///
/// A structural mismatch is not an `Err` here: it is carried in the result
/// so callers can show it. Use [`ComparisonResult::ensure_valid`] to turn it
/// into an error.
pub fn compare_layouts(golden: &LayoutStore, under_test: &LayoutStore) -> ComparisonResult {
    let start = Instant::now();
    log_op_start!(
        "compare",
        golden_count = golden.len(),
        under_test_count = under_test.len()
    );

    let structure = validate_structure(golden, under_test);
    if let StructuralCheck::Mismatch(m) = &structure {
        log_op_error!(
            "compare",
            m.to_error(),
            duration_ms = start.elapsed().as_millis() as u64,
            reference_id = %m.reference_id
        );
        return ComparisonResult {
            structure,
            classifications: BTreeMap::new(),
            one_sided: BTreeMap::new(),
        };
    }

    let mut classifications = BTreeMap::new();
    let mut one_sided = BTreeMap::new();
    for record in golden.iter() {
        match under_test.get(&record.reference_id) {
            Ok(other) => {
                classifications.insert(record.reference_id.clone(), classify(record, other));
            }
            Err(_) => {
                one_sided.insert(record.reference_id.clone(), Presence::OnlyInGolden);
            }
        }
    }
    for id in under_test.reference_ids().filter(|id| !golden.contains(id)) {
        one_sided.insert(id.to_string(), Presence::OnlyInUnderTest);
    }

    let result = ComparisonResult {
        structure,
        classifications,
        one_sided,
    };
    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        changed_count = result.changed_count(),
        unmatched_count = result.one_sided.len()
    );
    result
}
