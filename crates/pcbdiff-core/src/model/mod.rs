pub mod component;
pub mod record;
pub mod units;
pub mod update;

pub use component::ComponentType;
pub use record::{RawRow, Record, RowOutcome, SkipReason};
pub use units::{normalize_unit, split_value_unit};
pub use update::{EditForm, RecordUpdate, ValidatedUpdate};
