//! pcbdiff Store - flat-file I/O for placement tables
//!
//! Provides:
//! - CSV reading into raw rows, with header validation
//! - Loading a file straight into a `LayoutStore` plus its load report
//! - Writing a store back in the six-column format, atomically on disk

pub mod atomic;
pub mod csv_io;
pub mod errors;

// Re-export key types
pub use csv_io::{
    load_layout_file, read_layout_file, read_rows, save_layout_file, write_layout, OUTPUT_HEADER,
};
pub use errors::Result;
