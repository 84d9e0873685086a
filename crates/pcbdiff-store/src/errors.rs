//! Error handling for pcbdiff-store
//!
//! Wraps pcbdiff-core ExError with file-format helpers

use pcbdiff_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a parse error from a CSV reader/writer error
pub fn csv_error(operation: &str, err: csv::Error) -> ExError {
    let kind = if err.is_io_error() {
        ExErrorKind::Io
    } else {
        ExErrorKind::Parse
    };
    let message = match err.position() {
        Some(pos) => format!("line {}: {}", pos.line(), err),
        None => err.to_string(),
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_message(message)
}

/// Create a missing-column error
pub fn missing_header(column: &str) -> ExError {
    ExError::new(ExErrorKind::MissingHeader)
        .with_op("read_rows")
        .with_message(format!("Required column '{}' not found in header row", column))
}
