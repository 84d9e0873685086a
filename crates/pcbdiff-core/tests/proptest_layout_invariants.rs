//! Property-based invariant tests for the layout and diff engine.
//!
//! 1. Type inference follows the prefix table, case-insensitively.
//! 2. Rows missing X or Y never enter a store.
//! 3. Structural validation is symmetric.
//! 4. Classification is one of four values; `None` iff value and unit match.
//! 5. A larger viewport changes only absolute screen coordinates.
//! 6. Store rows reload into an identical store.

use pcbdiff_core::compare::{classify, compare_layouts, find_first_mismatch, DiffClass};
use pcbdiff_core::geometry::{compute_layout_geometry, GeometryConfig, Viewport};
use pcbdiff_core::model::{ComponentType, RawRow, Record};
use pcbdiff_core::ops::LayoutStore;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn placement_strategy() -> impl Strategy<Value = Vec<(i32, i32, i32)>> {
    prop::collection::vec((-5000i32..5000, -5000i32..5000, -720i32..720), 1..40)
}

fn store_from(placements: &[(i32, i32, i32)]) -> LayoutStore {
    LayoutStore::from_records(placements.iter().enumerate().map(|(i, (x, y, a))| {
        Record::new(format!("C{}", i), *x as f64, *y as f64, *a as f64, "1", "nF")
    }))
}

fn field_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "10", "100", "nF", "Ohms", "kOhms"]).prop_map(str::to_string)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Inference table
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inference_follows_prefix_table(prefix in "[a-zA-Z]", digits in "[0-9]{0,4}") {
        let reference = format!("{}{}", prefix, digits);
        let expected = match prefix.to_ascii_uppercase().as_str() {
            "C" => (ComponentType::Capacitor, "nF"),
            "R" => (ComponentType::Resistor, "Ohms"),
            "L" => (ComponentType::Inductor, "nH"),
            _ => (ComponentType::Unknown, ""),
        };
        let ty = ComponentType::infer(&reference);
        prop_assert_eq!(ty, expected.0);
        prop_assert_eq!(ty.default_unit(), expected.1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Rows missing X or Y are excluded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_missing_coordinates_are_excluded(
        flags in prop::collection::vec((any::<bool>(), any::<bool>()), 1..30)
    ) {
        let rows: Vec<RawRow> = flags
            .iter()
            .enumerate()
            .map(|(i, (drop_x, drop_y))| {
                let x = if *drop_x { "" } else { "10" };
                let y = if *drop_y { "" } else { "20" };
                RawRow::from_cells(&format!("R{}", i), x, y, "0", "", "")
            })
            .collect();
        let outcome = LayoutStore::from_rows(rows);
        for (i, (drop_x, drop_y)) in flags.iter().enumerate() {
            let id = format!("R{}", i);
            prop_assert_eq!(outcome.store.contains(&id), !(*drop_x || *drop_y));
        }
        prop_assert_eq!(outcome.report.loaded + outcome.report.skipped.len(), flags.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Symmetric structural validation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn structural_validation_is_symmetric(
        placements in placement_strategy(),
        moves in prop::collection::vec(any::<bool>(), 40),
    ) {
        let a = store_from(&placements);
        let moved: Vec<(i32, i32, i32)> = placements
            .iter()
            .zip(&moves)
            .map(|((x, y, r), m)| if *m { (*x, *y + 1, *r) } else { (*x, *y, *r) })
            .collect();
        let b = store_from(&moved);

        let forward = find_first_mismatch(&a, &b);
        let backward = find_first_mismatch(&b, &a);
        prop_assert_eq!(forward.is_some(), moves.iter().take(placements.len()).any(|m| *m));
        prop_assert_eq!(forward.map(|m| m.swapped()), backward);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Four-way classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classification_is_four_way(
        va in field_strategy(), ua in field_strategy(),
        vb in field_strategy(), ub in field_strategy(),
    ) {
        let a = Record::new("C1", 0.0, 0.0, 0.0, va.clone(), ua.clone());
        let b = Record::new("C1", 0.0, 0.0, 0.0, vb.clone(), ub.clone());
        let class = classify(&a, &b);
        let expected = match (va != vb, ua != ub) {
            (false, false) => DiffClass::None,
            (true, false) => DiffClass::ValueMismatch,
            (false, true) => DiffClass::UnitMismatch,
            (true, true) => DiffClass::Both,
        };
        prop_assert_eq!(class, expected);
        prop_assert_eq!(class == DiffClass::None, va == vb && ua == ub);

        let result = compare_layouts(
            &LayoutStore::from_records(vec![a]),
            &LayoutStore::from_records(vec![b]),
        );
        prop_assert_eq!(result.classification("C1"), Some(expected));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Viewport scaling invariance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn larger_viewport_preserves_relative_geometry(
        placements in placement_strategy(),
        w in 400.0f64..2000.0,
        h in 400.0f64..2000.0,
        grow in 1.0f64..4.0,
    ) {
        let store = store_from(&placements);
        let cfg = GeometryConfig::default();
        let small = compute_layout_geometry(&store, Viewport::new(w, h).unwrap(), &cfg).unwrap();
        let large = compute_layout_geometry(&store, Viewport::new(w * grow, h * grow).unwrap(), &cfg).unwrap();

        let origin_small = &small.components[0];
        let origin_large = &large.components[0];
        for ((s, l), rec) in small.components.iter().zip(&large.components).zip(store.iter()) {
            prop_assert_eq!(s.rotation_degrees, l.rotation_degrees);
            prop_assert_eq!(s.rotation_degrees, rec.angle);
            // screen offsets divided by scale recover the raw offsets in both
            let raw_dx = rec.x - store.iter().next().map(|r| r.x).unwrap_or(0.0);
            let raw_dy = rec.y - store.iter().next().map(|r| r.y).unwrap_or(0.0);
            let tol = 1e-6 * (1.0 + raw_dx.abs() + raw_dy.abs());
            prop_assert!(((s.screen_x - origin_small.screen_x) / small.fit.scale - raw_dx).abs() < tol);
            prop_assert!(((l.screen_x - origin_large.screen_x) / large.fit.scale - raw_dx).abs() < tol);
            prop_assert!(((s.screen_y - origin_small.screen_y) / small.fit.scale - raw_dy).abs() < tol);
            prop_assert!(((l.screen_y - origin_large.screen_y) / large.fit.scale - raw_dy).abs() < tol);
            prop_assert_eq!(s.screen_width, l.screen_width);
        }
        prop_assert!(large.fit.scale >= small.fit.scale);
    }
}

proptest! {
    #[test]
    fn fitted_layout_stays_inside_viewport(
        placements in placement_strategy(),
        w in 50.0f64..2000.0,
        h in 50.0f64..2000.0,
    ) {
        let store = store_from(&placements);
        let geo = compute_layout_geometry(&store, Viewport::new(w, h).unwrap(), &GeometryConfig::default()).unwrap();
        for c in &geo.components {
            prop_assert!(c.screen_x.is_finite() && c.screen_y.is_finite());
            prop_assert!(c.screen_x >= 0.0 && c.screen_x <= w + 1e-6);
            prop_assert!(c.screen_y >= 0.0 && c.screen_y <= h + 1e-6);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Row round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn store_rows_reload_identically(
        coords in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6, -360.0f64..360.0), 1..20),
        value in field_strategy(),
        unit in field_strategy(),
    ) {
        let original = LayoutStore::from_records(coords.iter().enumerate().map(|(i, (x, y, a))| {
            Record::new(format!("R{}", i), *x, *y, *a, value.clone(), unit.clone())
        }));
        let reloaded = LayoutStore::from_rows(original.to_rows()).store;
        let before: Vec<&Record> = original.iter().collect();
        let after: Vec<&Record> = reloaded.iter().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(original.digest().unwrap(), reloaded.digest().unwrap());
    }
}
