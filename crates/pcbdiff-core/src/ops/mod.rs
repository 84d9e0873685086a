pub mod store;

pub use store::{LayoutStore, LoadOutcome, LoadReport, SkippedRow, UpdateOutcome};
