use std::collections::HashMap;

use super::config::GeometryConfig;
use super::engine::{compute_layout_geometry, LayoutGeometry};
use super::fit::FitTransform;
use super::primitives::Viewport;
use super::transform::ComponentTransform;
use crate::errors::{PcbDiffError, Result};
use crate::ops::LayoutStore;

/// Hit/miss counters, for tests and debug logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Whole-layout requests served without touching any record
    pub hits: u64,
    /// Requests that rebuilt the fit transform and every record
    pub misses: u64,
    /// Individual records recomputed after an in-place edit
    pub records_recomputed: u64,
}

#[derive(Debug, Clone)]
struct CachedLayout {
    viewport: Viewport,
    config: GeometryConfig,
    layout_epoch: u64,
    store_revision: u64,
    geometry: LayoutGeometry,
    /// Record revision each transform was computed at
    record_revisions: HashMap<String, u64>,
}

/// Last computed geometry for one store
///
/// A viewport resize, a config change or a moved component (new
/// `layout_epoch`) rebuilds everything. Value/unit/angle edits only
/// recompute the edited records, keyed by their record revision.
/// Call [`GeometryCache::invalidate`] when the store itself is replaced.
#[derive(Debug, Clone, Default)]
pub struct GeometryCache {
    cached: Option<CachedLayout>,
    stats: CacheStats,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry for `store`, reusing the last result where it still holds
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometryConfig` if the config fails validation.
    pub fn geometry(
        &mut self,
        store: &LayoutStore,
        viewport: Viewport,
        config: &GeometryConfig,
    ) -> Result<&LayoutGeometry> {
        let reusable = self.cached.as_ref().is_some_and(|c| {
            c.viewport == viewport
                && c.config == *config
                && c.layout_epoch == store.layout_epoch()
                && c.geometry.components.len() == store.len()
        });

        if reusable {
            if let Some(cached) = self.cached.as_mut() {
                if cached.store_revision == store.revision() {
                    self.stats.hits += 1;
                } else {
                    let fit = cached.geometry.fit;
                    refresh_edited(cached, store, &fit, config, &mut self.stats);
                    cached.store_revision = store.revision();
                }
            }
        } else {
            let geometry = compute_layout_geometry(store, viewport, config)?;
            let record_revisions = store
                .iter_with_revision()
                .map(|(r, rev)| (r.reference_id.clone(), rev))
                .collect();
            self.stats.misses += 1;
            tracing::debug!(misses = self.stats.misses, "geometry cache miss");
            self.cached = Some(CachedLayout {
                viewport,
                config: *config,
                layout_epoch: store.layout_epoch(),
                store_revision: store.revision(),
                geometry,
                record_revisions,
            });
        }

        self.cached
            .as_ref()
            .map(|c| &c.geometry)
            .ok_or_else(|| PcbDiffError::Internal {
                message: "geometry cache empty after refresh".to_string(),
            })
    }

    /// Drop the cached geometry, e.g. after the store is replaced
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

fn refresh_edited(
    cached: &mut CachedLayout,
    store: &LayoutStore,
    fit: &FitTransform,
    config: &GeometryConfig,
    stats: &mut CacheStats,
) {
    for ((record, revision), slot) in store
        .iter_with_revision()
        .zip(cached.geometry.components.iter_mut())
    {
        let seen = cached.record_revisions.get(&record.reference_id).copied();
        if seen != Some(revision) {
            *slot = ComponentTransform::for_record(record, fit, config);
            cached
                .record_revisions
                .insert(record.reference_id.clone(), revision);
            stats.records_recomputed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRow, RecordUpdate};

    fn store() -> LayoutStore {
        LayoutStore::from_rows(vec![
            RawRow::from_cells("C1", "0", "0", "0", "100", "nF"),
            RawRow::from_cells("R1", "1000", "500", "0", "10", "Ohms"),
        ])
        .store
    }

    fn vp(w: f64) -> Viewport {
        Viewport::new(w, 800.0).unwrap()
    }

    #[test]
    fn test_repeat_request_hits() {
        let store = store();
        let mut cache = GeometryCache::new();
        let cfg = GeometryConfig::default();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_resize_rebuilds() {
        let store = store();
        let mut cache = GeometryCache::new();
        let cfg = GeometryConfig::default();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();
        cache.geometry(&store, vp(1400.0), &cfg).unwrap();
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_value_edit_recomputes_one_record() {
        let mut store = store();
        let mut cache = GeometryCache::new();
        let cfg = GeometryConfig::default();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();

        store.update("C1", &RecordUpdate::new().with_value("220")).unwrap();
        let label = cache
            .geometry(&store, vp(1200.0), &cfg)
            .unwrap()
            .get("C1")
            .unwrap()
            .label
            .clone();
        assert_eq!(label, "C1 220nF");
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().records_recomputed, 1);
    }

    #[test]
    fn test_move_rebuilds_and_matches_fresh_compute() {
        let mut store = store();
        let mut cache = GeometryCache::new();
        let cfg = GeometryConfig::default();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();

        store.update("R1", &RecordUpdate::new().with_position("2000", "500")).unwrap();
        let cached = cache.geometry(&store, vp(1200.0), &cfg).unwrap().clone();
        assert_eq!(cache.stats().misses, 2);
        let fresh = compute_layout_geometry(&store, vp(1200.0), &cfg).unwrap();
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let store = store();
        let mut cache = GeometryCache::new();
        let cfg = GeometryConfig::default();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();
        cache.invalidate();
        cache.geometry(&store, vp(1200.0), &cfg).unwrap();
        assert_eq!(cache.stats().misses, 2);
    }
}
