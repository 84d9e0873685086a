//! Comparison scenarios
//!
//! Value, unit and structural mismatches between a golden reference and a
//! unit under test, plus rows that cannot be placed.
mod common;

use common::{rows, session_with, store};
use pcbdiff_core::compare::{compare_layouts, DiffClass, Presence};
use pcbdiff_core::errors::PcbDiffError;
use pcbdiff_core::geometry::Viewport;
use pcbdiff_core::ops::LayoutStore;
use pcbdiff_core::projection::HighlightClass;
use pcbdiff_core::{apply, Command, Session};
use pcbdiff_core_types::Slot;

#[test]
fn test_scenario_value_mismatch() {
    // GIVEN the same capacitor with a different value in B
    let a = store(&["C1,1200,3100,0,100,nF"]);
    let b = store(&["C1,1200,3100,0,220,nF"]);

    // WHEN comparing
    let result = compare_layouts(&a, &b);

    // THEN C1 is a value mismatch
    assert!(result.is_valid());
    assert_eq!(result.classification("C1"), Some(DiffClass::ValueMismatch));
}

#[test]
fn test_scenario_unit_mismatch() {
    // GIVEN the same resistor with a different unit in B
    let a = store(&["R5,800,400,90,10,Ohms"]);
    let b = store(&["R5,800,400,90,10,kOhms"]);

    // WHEN comparing
    let result = compare_layouts(&a, &b);

    // THEN R5 is a unit mismatch
    assert_eq!(result.classification("R5"), Some(DiffClass::UnitMismatch));
}

#[test]
fn test_scenario_both_fields_differ() {
    let a = store(&["L7,1,1,0,10,nH"]);
    let b = store(&["L7,1,1,0,22,uH"]);
    assert_eq!(compare_layouts(&a, &b).classification("L7"), Some(DiffClass::Both));
}

#[test]
fn test_scenario_structural_mismatch_refuses_b() {
    // GIVEN A loaded with L2 at (500, 500)
    let (session, _) = apply(
        Session::new(),
        Command::LoadLayout {
            slot: Slot::A,
            rows: rows(&["L2,500,500,0,,"]),
        },
    )
    .unwrap();

    // WHEN loading B with L2 at (500, 501)
    let result = apply(
        session,
        Command::LoadLayout {
            slot: Slot::B,
            rows: rows(&["L2,500,501,0,,"]),
        },
    );

    // THEN the load fails with a structural mismatch naming L2 and both coordinates
    match result {
        Err(PcbDiffError::StructuralMismatch {
            reference_id,
            golden,
            under_test,
        }) => {
            assert_eq!(reference_id, "L2");
            assert_eq!(golden, (500.0, 500.0));
            assert_eq!(under_test, (500.0, 501.0));
        }
        other => panic!("expected structural mismatch, got {:?}", other),
    }
}

#[test]
fn test_scenario_structural_mismatch_message() {
    let a = store(&["L2,500,500,0,,"]);
    let b = store(&["L2,500,501,0,,"]);
    let err = compare_layouts(&a, &b).ensure_valid().unwrap_err();
    let text = err.to_string();
    assert!(text.contains("L2"));
    assert!(text.contains("(500.0, 500.0)"));
    assert!(text.contains("(500.0, 501.0)"));
}

#[test]
fn test_scenario_missing_x_is_excluded_everywhere() {
    // GIVEN a row without X in both files
    let lines = ["C1,1200,3100,0,100,nF", "X9,,100,0,5,V"];
    let outcome = LayoutStore::from_rows(rows(&lines));

    // THEN X9 is not in the store, and the report names it
    assert!(!outcome.store.contains("X9"));
    assert_eq!(outcome.report.skipped.len(), 1);
    assert_eq!(outcome.report.skipped[0].reference_id.as_deref(), Some("X9"));

    // AND it appears in neither geometry, highlights nor the diff table
    let mut session = session_with(&lines, &["C1,1200,3100,0,220,nF", "X9,,100,0,6,V"]);
    let viewport = Viewport::new(800.0, 600.0).unwrap();
    let geometry = session.geometry(Slot::B, viewport).unwrap();
    assert!(geometry.get("X9").is_none());

    let highlights = session.highlights(Slot::B).unwrap();
    assert!(highlights.iter().all(|h| h.reference_id != "X9"));

    let table = session.differences().unwrap();
    assert!(table.rows.iter().all(|r| r.reference_id != "X9"));
    assert!(table.unmatched.is_empty());
}

#[test]
fn test_scenario_one_sided_components_are_unmatched() {
    // GIVEN B lacks R1 and adds U4
    let mut session = session_with(
        &["C1,0,0,0,1,nF", "R1,5,5,0,1,Ohms"],
        &["C1,0,0,0,1,nF", "U4,9,9,0,,"],
    );

    // WHEN comparing
    let result = session.compare().unwrap().clone();

    // THEN neither is a structural failure, each is listed with its side
    assert!(result.is_valid());
    assert_eq!(result.one_sided.get("R1"), Some(&Presence::OnlyInGolden));
    assert_eq!(result.one_sided.get("U4"), Some(&Presence::OnlyInUnderTest));

    // AND the viewed layout highlights its own unmatched record
    let in_a = session.highlights(Slot::A).unwrap();
    let r1 = in_a.iter().find(|h| h.reference_id == "R1").unwrap();
    assert_eq!(r1.class, HighlightClass::Unmatched);
}

#[test]
fn test_scenario_table_reports_golden_as_old_in_either_view() {
    let mut session = session_with(&["C1,1200,3100,0,100,nF"], &["C1,1200,3100,0,220,nF"]);
    let table = session.differences().unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].old_value, "100");
    assert_eq!(table.rows[0].new_value, "220");
}
