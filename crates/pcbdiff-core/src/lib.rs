//! pcbdiff Core - layout and diff engine for PCB placement files
//!
//! This crate provides the in-memory model and pure operations for comparing
//! a Golden Reference layout (A) with a Unit Under Test (B), including:
//! - Record Model: raw rows to placed records, type inference, edit requests
//! - Layout Store: ordered records per file with revision tracking
//! - Geometry Engine: scale-to-fit, rotation and label placement, plus cache
//! - Comparator: structural validation and value/unit classification
//! - Diff Projection: highlight classes and the sortable differences table
//! - Session boundary driven by `Command`s through `apply()`
//!
//! No file I/O happens here; see the `pcbdiff-store` crate.

pub mod apply;
pub mod commands;
pub mod compare;
pub mod errors;
pub mod geometry;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod projection;
pub mod render;
pub mod session;

#[doc(hidden)]
pub use pcbdiff_core_types as core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::{Command, CommandOutcome};
pub use compare::{compare_layouts, ComparisonResult, DiffClass, Presence};
pub use errors::{ExError, ExErrorKind, PcbDiffError, Result};
pub use geometry::{compute_layout_geometry, GeometryConfig, Viewport};
pub use model::{ComponentType, RawRow, Record, RecordUpdate};
pub use ops::LayoutStore;
pub use projection::{build_diff_table, DiffTable, HighlightClass};
pub use render::render_summary;
pub use session::Session;
