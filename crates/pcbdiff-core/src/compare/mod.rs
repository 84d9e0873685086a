//! Comparator: structural validation and per-component diff classification

pub mod engine;
pub mod model;

pub use engine::{classify, compare_layouts, find_first_mismatch, validate_structure};
pub use model::{ComparisonResult, CoordinateMismatch, DiffClass, Presence, StructuralCheck};
