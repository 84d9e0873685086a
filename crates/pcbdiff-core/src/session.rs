//! Two-slot session: golden reference, unit under test, caches
//!
//! The session owns both layouts and everything derived from them. The
//! view being drawn is always passed in as a [`Slot`]; the session keeps no
//! notion of a current view.

use pcbdiff_core_types::Slot;

use crate::commands::{Command, CommandOutcome};
use crate::compare::{compare_layouts, validate_structure, ComparisonResult, StructuralCheck};
use crate::errors::{PcbDiffError, Result};
use crate::geometry::{CacheStats, GeometryCache, GeometryConfig, LayoutGeometry, Viewport};
use crate::model::EditForm;
use crate::ops::LayoutStore;
use crate::projection::{
    build_diff_table, highlight_classes, DiffTable, HighlightClass, RecordHighlight,
};

/// Identity of the store contents a comparison was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ComparisonKey {
    loads: u64,
    golden_revision: u64,
    under_test_revision: u64,
}

#[derive(Debug, Clone)]
struct CachedComparison {
    key: ComparisonKey,
    result: ComparisonResult,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    golden: Option<LayoutStore>,
    under_test: Option<LayoutStore>,
    golden_cache: GeometryCache,
    under_test_cache: GeometryCache,
    config: GeometryConfig,
    /// Bumped whenever a slot's store is replaced or cleared
    loads: u64,
    comparison: Option<CachedComparison>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `InvalidGeometryConfig` if the config fails validation.
    pub fn with_config(config: GeometryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn is_loaded(&self, slot: Slot) -> bool {
        self.slot(slot).is_some()
    }

    fn slot(&self, slot: Slot) -> Option<&LayoutStore> {
        match slot {
            Slot::A => self.golden.as_ref(),
            Slot::B => self.under_test.as_ref(),
        }
    }

    /// # Errors
    ///
    /// Returns `SlotEmpty` if nothing is loaded in `slot`.
    pub fn store(&self, slot: Slot) -> Result<&LayoutStore> {
        self.slot(slot).ok_or(PcbDiffError::SlotEmpty { slot })
    }

    /// Run one command, leaving the session untouched on error
    ///
    /// # Errors
    ///
    /// - `GoldenNotLoaded` when loading B with no A
    /// - `StructuralMismatch` when a B load does not match A
    /// - `SlotEmpty` when editing an empty slot
    /// - Any error from [`LayoutStore::update`]
    pub fn execute(&mut self, cmd: Command) -> Result<CommandOutcome> {
        match cmd {
            Command::LoadLayout { slot, rows } => {
                if slot == Slot::B && self.golden.is_none() {
                    return Err(PcbDiffError::GoldenNotLoaded);
                }
                let outcome = LayoutStore::from_rows(rows);
                if slot == Slot::B {
                    let golden = self.store(Slot::A)?;
                    if let StructuralCheck::Mismatch(m) = validate_structure(golden, &outcome.store) {
                        tracing::warn!(
                            slot = %slot,
                            reference_id = %m.reference_id,
                            "load refused: layout does not match golden reference"
                        );
                        return Err(m.to_error());
                    }
                }
                self.replace(slot, Some(outcome.store));
                Ok(CommandOutcome::Loaded {
                    slot,
                    report: outcome.report,
                })
            }
            Command::UpdateRecord {
                slot,
                reference_id,
                update,
            } => {
                let store = match slot {
                    Slot::A => self.golden.as_mut(),
                    Slot::B => self.under_test.as_mut(),
                }
                .ok_or(PcbDiffError::SlotEmpty { slot })?;
                let outcome = store.update(&reference_id, &update)?;
                Ok(CommandOutcome::Updated {
                    slot,
                    reference_id,
                    outcome,
                })
            }
            Command::ClearSlot { slot } => {
                self.replace(slot, None);
                Ok(CommandOutcome::Cleared { slots: vec![slot] })
            }
            Command::ClearAll => {
                self.replace(Slot::A, None);
                self.replace(Slot::B, None);
                Ok(CommandOutcome::Cleared {
                    slots: vec![Slot::A, Slot::B],
                })
            }
        }
    }

    fn replace(&mut self, slot: Slot, store: Option<LayoutStore>) {
        match slot {
            Slot::A => {
                self.golden = store;
                self.golden_cache.invalidate();
            }
            Slot::B => {
                self.under_test = store;
                self.under_test_cache.invalidate();
            }
        }
        self.loads += 1;
        self.comparison = None;
    }

    /// Compare A with B, reusing the last result while neither store changed
    ///
    /// A structural mismatch is reported inside the result.
    ///
    /// # Errors
    ///
    /// Returns `SlotEmpty` unless both slots are loaded.
    pub fn compare(&mut self) -> Result<&ComparisonResult> {
        self.refresh_comparison()?;
        self.current_comparison()
    }

    fn current_comparison(&self) -> Result<&ComparisonResult> {
        self.comparison
            .as_ref()
            .map(|c| &c.result)
            .ok_or_else(|| PcbDiffError::Internal {
                message: "comparison missing after refresh".to_string(),
            })
    }

    fn refresh_comparison(&mut self) -> Result<()> {
        let golden = self.store(Slot::A)?;
        let under_test = self.store(Slot::B)?;
        let key = ComparisonKey {
            loads: self.loads,
            golden_revision: golden.revision(),
            under_test_revision: under_test.revision(),
        };
        if self.comparison.as_ref().is_some_and(|c| c.key == key) {
            return Ok(());
        }
        let result = compare_layouts(golden, under_test);
        self.comparison = Some(CachedComparison { key, result });
        Ok(())
    }

    /// Screen geometry for one slot, served from that slot's cache
    ///
    /// # Errors
    ///
    /// - `SlotEmpty` if nothing is loaded in `slot`
    /// - `InvalidGeometryConfig` if the session config is unusable
    pub fn geometry(&mut self, slot: Slot, viewport: Viewport) -> Result<&LayoutGeometry> {
        let (store, cache) = match slot {
            Slot::A => (self.golden.as_ref(), &mut self.golden_cache),
            Slot::B => (self.under_test.as_ref(), &mut self.under_test_cache),
        };
        let store = store.ok_or(PcbDiffError::SlotEmpty { slot })?;
        cache.geometry(store, viewport, &self.config)
    }

    /// Highlight classes for the records of the slot being viewed
    ///
    /// With only the viewed slot loaded there is nothing to compare against,
    /// so every record gets [`HighlightClass::Default`].
    ///
    /// # Errors
    ///
    /// - `SlotEmpty` if nothing is loaded in `viewed`
    /// - `StructuralMismatch` if the layouts do not match
    pub fn highlights(&mut self, viewed: Slot) -> Result<Vec<RecordHighlight>> {
        let store = self.store(viewed)?;
        if !self.is_loaded(viewed.other()) {
            return Ok(store
                .reference_ids()
                .map(|id| RecordHighlight {
                    reference_id: id.to_string(),
                    class: HighlightClass::Default,
                })
                .collect());
        }
        self.refresh_comparison()?;
        highlight_classes(self.current_comparison()?, self.store(viewed)?)
    }

    /// Differences table, default-ordered by reference
    ///
    /// # Errors
    ///
    /// - `SlotEmpty` unless both slots are loaded
    /// - `StructuralMismatch` if the layouts do not match
    pub fn differences(&mut self) -> Result<DiffTable> {
        self.refresh_comparison()?;
        build_diff_table(
            self.current_comparison()?,
            self.store(Slot::A)?,
            self.store(Slot::B)?,
        )
    }

    /// Pre-populated edit form for one record
    ///
    /// # Errors
    ///
    /// - `SlotEmpty` if nothing is loaded in `slot`
    /// - `RecordNotFound` if the reference is not in that slot
    pub fn edit_form(&self, slot: Slot, reference_id: &str) -> Result<EditForm> {
        let record = self.store(slot)?.get(reference_id)?;
        Ok(EditForm::for_record(record))
    }

    /// Geometry cache counters for a slot
    pub fn cache_stats(&self, slot: Slot) -> CacheStats {
        match slot {
            Slot::A => self.golden_cache.stats(),
            Slot::B => self.under_test_cache.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRow, RecordUpdate};

    fn load(session: &mut Session, slot: Slot, rows: &[[&str; 6]]) -> Result<CommandOutcome> {
        let rows = rows
            .iter()
            .map(|r| RawRow::from_cells(r[0], r[1], r[2], r[3], r[4], r[5]))
            .collect();
        session.execute(Command::LoadLayout { slot, rows })
    }

    #[test]
    fn test_b_requires_a() {
        let mut session = Session::new();
        let err = load(&mut session, Slot::B, &[["C1", "0", "0", "0", "", ""]]).unwrap_err();
        assert_eq!(err, PcbDiffError::GoldenNotLoaded);
        assert!(!session.is_loaded(Slot::B));
    }

    #[test]
    fn test_comparison_reused_until_edit() {
        let mut session = Session::new();
        load(&mut session, Slot::A, &[["C1", "0", "0", "0", "100", "nF"]]).unwrap();
        load(&mut session, Slot::B, &[["C1", "0", "0", "0", "100", "nF"]]).unwrap();
        assert_eq!(session.compare().unwrap().changed_count(), 0);

        session
            .execute(Command::UpdateRecord {
                slot: Slot::B,
                reference_id: "C1".to_string(),
                update: RecordUpdate::new().with_value("220"),
            })
            .unwrap();
        assert_eq!(session.compare().unwrap().changed_count(), 1);
    }

    #[test]
    fn test_reloading_a_drops_stale_comparison() {
        let mut session = Session::new();
        load(&mut session, Slot::A, &[["C1", "0", "0", "0", "100", "nF"]]).unwrap();
        load(&mut session, Slot::B, &[["C1", "0", "0", "0", "220", "nF"]]).unwrap();
        assert_eq!(session.compare().unwrap().changed_count(), 1);

        load(&mut session, Slot::A, &[["C1", "0", "0", "0", "220", "nF"]]).unwrap();
        assert_eq!(session.compare().unwrap().changed_count(), 0);
    }

    #[test]
    fn test_highlights_default_until_both_loaded() {
        let mut session = Session::new();
        assert!(matches!(
            session.highlights(Slot::A),
            Err(PcbDiffError::SlotEmpty { slot: Slot::A })
        ));

        load(
            &mut session,
            Slot::A,
            &[
                ["R5", "800", "400", "90", "10", "Ohms"],
                ["C1", "0", "0", "0", "100", "nF"],
            ],
        )
        .unwrap();
        let classes: Vec<(String, HighlightClass)> = session
            .highlights(Slot::A)
            .unwrap()
            .into_iter()
            .map(|h| (h.reference_id, h.class))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("R5".to_string(), HighlightClass::Default),
                ("C1".to_string(), HighlightClass::Default),
            ]
        );
        assert!(matches!(
            session.highlights(Slot::B),
            Err(PcbDiffError::SlotEmpty { slot: Slot::B })
        ));

        load(
            &mut session,
            Slot::B,
            &[
                ["R5", "800", "400", "90", "22", "Ohms"],
                ["C1", "0", "0", "0", "100", "nF"],
            ],
        )
        .unwrap();
        let r5 = &session.highlights(Slot::A).unwrap()[0];
        assert_eq!(r5.class, HighlightClass::Value);
    }

    #[test]
    fn test_edit_form_reads_slot() {
        let mut session = Session::new();
        load(&mut session, Slot::A, &[["R5", "800", "400", "90", "10", ""]]).unwrap();
        let form = session.edit_form(Slot::A, "R5").unwrap();
        assert_eq!(form.unit, "Ohms");
        assert!(matches!(
            session.edit_form(Slot::B, "R5"),
            Err(PcbDiffError::SlotEmpty { slot: Slot::B })
        ));
    }
}
