use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{PcbDiffError, Result};
use crate::geometry::Rect;
use crate::model::{RawRow, Record, RecordUpdate, RowOutcome, SkipReason};
use crate::{log_op_end, log_op_error, log_op_start};

/// A row dropped during load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source table, counting the header as line 1
    pub line: usize,
    /// Reference text of the row, when it had one
    pub reference_id: Option<String>,
    pub reason: SkipReason,
}

/// What happened to the rows handed to [`LayoutStore::from_rows`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Records in the resulting store
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
    /// References that appeared on more than one row; the last row won
    pub duplicates: Vec<String>,
}

/// A freshly loaded store together with its load report
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub store: LayoutStore,
    pub report: LoadReport,
}

/// Result of a successful [`LayoutStore::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The edit moved the component, which can change the fit transform
    pub position_changed: bool,
    /// Store revision after the edit
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    record: Record,
    revision: u64,
}

/// Ordered mapping from reference designator to record for one file
///
/// Iteration follows the row order of the source table. Records can only
/// change through [`LayoutStore::update`]; there is no insertion or deletion
/// after load. Not thread-safe - designed for single-threaded use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStore {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    /// Bumped on every successful update
    revision: u64,
    /// Bumped when an update moves a component
    layout_epoch: u64,
}

impl LayoutStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw rows, dropping rows that cannot be placed
    ///
    /// A reference that appears twice keeps the position of its first row
    /// and the fields of its last row.
    pub fn from_rows<I>(rows: I) -> LoadOutcome
    where
        I: IntoIterator<Item = RawRow>,
    {
        let start = Instant::now();
        log_op_start!("load_layout");

        let mut store = LayoutStore::new();
        let mut report = LoadReport::default();

        for (idx, row) in rows.into_iter().enumerate() {
            let line = idx + 2;
            match Record::from_row(&row) {
                RowOutcome::Placed(record) => {
                    let id = record.reference_id.clone();
                    if store.insert(record) {
                        tracing::warn!(reference_id = %id, line, "duplicate reference, later row wins");
                        if !report.duplicates.contains(&id) {
                            report.duplicates.push(id);
                        }
                    }
                }
                RowOutcome::Skipped(reason) => {
                    let reference_id = row
                        .reference_id
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string);
                    tracing::debug!(line, ?reference_id, reason = reason.as_str(), "row skipped");
                    report.skipped.push(SkippedRow {
                        line,
                        reference_id,
                        reason,
                    });
                }
            }
        }

        report.loaded = store.len();
        log_op_end!(
            "load_layout",
            duration_ms = start.elapsed().as_millis() as u64,
            record_count = report.loaded,
            skipped_count = report.skipped.len()
        );

        LoadOutcome { store, report }
    }

    /// Build a store from records that are already valid
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut store = LayoutStore::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert during construction; returns true when an earlier record was replaced
    fn insert(&mut self, record: Record) -> bool {
        match self.index.get(&record.reference_id) {
            Some(&pos) => {
                self.entries[pos].record = record;
                true
            }
            None => {
                self.index
                    .insert(record.reference_id.clone(), self.entries.len());
                self.entries.push(Entry {
                    record,
                    revision: 0,
                });
                false
            }
        }
    }

    /// Get a record by reference
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if the reference is not in the store.
    pub fn get(&self, reference_id: &str) -> Result<&Record> {
        self.index
            .get(reference_id)
            .map(|&pos| &self.entries[pos].record)
            .ok_or_else(|| PcbDiffError::RecordNotFound {
                reference_id: reference_id.to_string(),
            })
    }

    pub fn contains(&self, reference_id: &str) -> bool {
        self.index.contains_key(reference_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in source row order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Records with the store revision at which each was last edited
    pub fn iter_with_revision(&self) -> impl Iterator<Item = (&Record, u64)> {
        self.entries.iter().map(|e| (&e.record, e.revision))
    }

    /// References in source row order
    pub fn reference_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.record.reference_id.as_str())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    /// Apply an edit to one record
    ///
    /// The update is validated first; on error the store is unchanged.
    ///
    /// # Errors
    ///
    /// - `EmptyReference` if `reference_id` is blank
    /// - `RecordNotFound` if the reference is not in the store
    /// - `MissingCoordinate` / `MalformedCoordinate` if X or Y is unusable
    pub fn update(&mut self, reference_id: &str, update: &RecordUpdate) -> Result<UpdateOutcome> {
        let start = Instant::now();
        log_op_start!("update_record", reference_id = reference_id);

        let result = self.apply_update(reference_id, update);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(outcome) => {
                log_op_end!(
                    "update_record",
                    duration_ms = duration_ms,
                    position_changed = outcome.position_changed
                );
            }
            Err(err) => {
                log_op_error!("update_record", err.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn apply_update(&mut self, reference_id: &str, update: &RecordUpdate) -> Result<UpdateOutcome> {
        if reference_id.trim().is_empty() {
            return Err(PcbDiffError::EmptyReference);
        }
        let pos = *self
            .index
            .get(reference_id)
            .ok_or_else(|| PcbDiffError::RecordNotFound {
                reference_id: reference_id.to_string(),
            })?;
        let checked = update.validate(reference_id)?;

        let entry = &mut self.entries[pos];
        let mut record = entry.record.clone();
        let position_changed = checked.apply_to(&mut record);

        self.revision += 1;
        entry.record = record;
        entry.revision = self.revision;
        if position_changed {
            self.layout_epoch += 1;
        }

        Ok(UpdateOutcome {
            position_changed,
            revision: self.revision,
        })
    }

    /// Raw coordinate extents of all records, `None` when empty
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.iter();
        let first = iter.next()?;
        let init = Rect::new(first.x, first.y, first.x, first.y);
        Some(iter.fold(init, |r, rec| r.include(rec.x, rec.y)))
    }

    /// Output rows in store order, reflecting in-memory edits
    pub fn to_rows(&self) -> Vec<RawRow> {
        self.iter().map(Record::to_row).collect()
    }

    /// SHA-256 content digest over the records in order
    ///
    /// Two stores with the same records in the same order have the same
    /// digest, regardless of edit history.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if JSON encoding fails.
    pub fn digest(&self) -> Result<String> {
        let records: Vec<&Record> = self.iter().collect();
        let canonical = serde_json::to_string(&records)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}
