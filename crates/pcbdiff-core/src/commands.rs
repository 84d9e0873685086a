//! Commands accepted by the session boundary
//!
//! Every state change a shell can request is one of these. They are
//! processed by [`apply`](crate::apply::apply), which either returns the new
//! session with an outcome or an error with nothing committed.

use pcbdiff_core_types::Slot;

use crate::model::{RawRow, RecordUpdate};
use crate::ops::{LoadReport, UpdateOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the layout in a slot with freshly read rows
    ///
    /// Loading B requires A and is refused if B would not match A
    /// structurally.
    LoadLayout { slot: Slot, rows: Vec<RawRow> },

    /// Edit one record in place
    UpdateRecord {
        slot: Slot,
        reference_id: String,
        update: RecordUpdate,
    },

    /// Drop the layout in one slot
    ClearSlot { slot: Slot },

    /// Drop both layouts
    ClearAll,
}

impl Command {
    /// Short name used as the `command` log field
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadLayout { .. } => "load_layout",
            Command::UpdateRecord { .. } => "update_record",
            Command::ClearSlot { .. } => "clear_slot",
            Command::ClearAll => "clear_all",
        }
    }
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Loaded { slot: Slot, report: LoadReport },
    Updated {
        slot: Slot,
        reference_id: String,
        outcome: UpdateOutcome,
    },
    Cleared { slots: Vec<Slot> },
}
