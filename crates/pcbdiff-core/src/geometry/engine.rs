use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::config::GeometryConfig;
use super::fit::FitTransform;
use super::primitives::Viewport;
use super::transform::ComponentTransform;
use crate::errors::Result;
use crate::ops::LayoutStore;
use crate::{log_op_end, log_op_error, log_op_start};

/// Screen geometry for a whole store at one viewport size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    pub viewport: Viewport,
    pub fit: FitTransform,
    /// One entry per record, in store order
    pub components: Vec<ComponentTransform>,
}

impl LayoutGeometry {
    pub fn get(&self, reference_id: &str) -> Option<&ComponentTransform> {
        self.components
            .iter()
            .find(|c| c.reference_id == reference_id)
    }
}

/// Compute per-record screen transforms for a store
///
/// # Errors
///
/// Returns `InvalidGeometryConfig` if the config fails validation.
pub fn compute_layout_geometry(
    store: &LayoutStore,
    viewport: Viewport,
    config: &GeometryConfig,
) -> Result<LayoutGeometry> {
    let start = Instant::now();
    log_op_start!("compute_geometry", record_count = store.len());

    if let Err(err) = config.validate() {
        log_op_error!(
            "compute_geometry",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err);
    }

    let fit = FitTransform::compute(store.bounds(), viewport, config);
    let components = store
        .iter()
        .map(|record| ComponentTransform::for_record(record, &fit, config))
        .collect();

    log_op_end!(
        "compute_geometry",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(LayoutGeometry {
        viewport,
        fit,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PcbDiffError;
    use crate::model::RawRow;

    fn store() -> LayoutStore {
        LayoutStore::from_rows(vec![
            RawRow::from_cells("C1", "0", "0", "0", "100", "nF"),
            RawRow::from_cells("R1", "1000", "500", "90", "10", "Ohms"),
        ])
        .store
    }

    #[test]
    fn test_one_transform_per_record_in_order() {
        let vp = Viewport::new(1200.0, 800.0).unwrap();
        let geo = compute_layout_geometry(&store(), vp, &GeometryConfig::default()).unwrap();
        let ids: Vec<&str> = geo.components.iter().map(|c| c.reference_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "R1"]);
        assert_eq!(geo.fit.scale, 1.0);
        let r1 = geo.get("R1").unwrap();
        assert_eq!((r1.screen_x, r1.screen_y), (1100.0, 600.0));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let vp = Viewport::new(100.0, 100.0).unwrap();
        let cfg = GeometryConfig {
            footprint_width_px: -1.0,
            ..GeometryConfig::default()
        };
        let err = compute_layout_geometry(&store(), vp, &cfg).unwrap_err();
        assert!(matches!(err, PcbDiffError::InvalidGeometryConfig { .. }));
    }

    #[test]
    fn test_board_spanning_f64_range_projects_inside_viewport() {
        let store = LayoutStore::from_rows(vec![
            RawRow::from_cells("C1", "-1e308", "0", "0", "", ""),
            RawRow::from_cells("C2", "1e308", "10", "0", "", ""),
        ])
        .store;
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let geo = compute_layout_geometry(&store, vp, &GeometryConfig::default()).unwrap();
        assert!(geo.fit.scale > 0.0);
        for c in &geo.components {
            assert!(c.screen_x.is_finite() && c.screen_y.is_finite(), "{}", c.reference_id);
            assert!((0.0..=800.0).contains(&c.screen_x));
            assert!((0.0..=600.0).contains(&c.screen_y));
            assert!(c.corners.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn test_empty_store_has_no_components() {
        let vp = Viewport::new(100.0, 100.0).unwrap();
        let geo = compute_layout_geometry(&LayoutStore::new(), vp, &GeometryConfig::default()).unwrap();
        assert!(geo.components.is_empty());
    }
}
