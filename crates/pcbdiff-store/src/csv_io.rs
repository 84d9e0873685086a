//! Placement table reading and writing
//!
//! Input needs a header row naming at least `ReferenceID` (or `Ref`), `X`
//! and `Y`; `Angle`, `Value` and `Unit` are optional and other columns are
//! ignored. Output always uses [`OUTPUT_HEADER`].

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use pcbdiff_core::model::RawRow;
use pcbdiff_core::ops::{LayoutStore, LoadOutcome};
use pcbdiff_core::{log_op_end, log_op_error, log_op_start};

use crate::atomic::atomic_write;
use crate::errors::{csv_error, io_error, missing_header, Result};

/// Column order of saved files
pub const OUTPUT_HEADER: [&str; 6] = ["ReferenceID", "X", "Y", "Angle", "Value", "Unit"];

const BOM: char = '\u{feff}';

/// Normalize a header row for [`RawRow`] and check the required columns
///
/// `Ref` is an alias of `ReferenceID`; when both are present the `Ref`
/// column is ignored.
fn resolve_headers(header: &csv::StringRecord) -> Result<csv::StringRecord> {
    let names: Vec<&str> = header
        .iter()
        .map(|h| h.trim_start_matches(BOM).trim())
        .collect();
    let has = |name: &str| names.contains(&name);

    if !has("ReferenceID") && !has("Ref") {
        return Err(missing_header("ReferenceID"));
    }
    for required in ["X", "Y"] {
        if !has(required) {
            return Err(missing_header(required));
        }
    }

    let shadowed_alias = has("ReferenceID");
    Ok(names
        .into_iter()
        .map(|n| if shadowed_alias && n == "Ref" { "" } else { n })
        .collect())
}

/// Read raw rows from CSV text
///
/// Headers and cells are trimmed. Short rows are allowed; missing trailing
/// cells read as blank.
///
/// # Errors
///
/// - `MissingHeader` if a required column is absent
/// - `Parse` for malformed CSV (e.g. invalid UTF-8)
/// - `Io` if the reader fails
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = rdr.headers().map_err(|e| csv_error("read_rows", e))?.clone();
    rdr.set_headers(resolve_headers(&header)?);

    rdr.deserialize::<RawRow>()
        .map(|row| row.map_err(|e| csv_error("read_rows", e)))
        .collect()
}

/// Read the raw rows of a placement file
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened, or any error from [`read_rows`].
pub fn read_layout_file(path: &Path) -> Result<Vec<RawRow>> {
    let start = Instant::now();
    let path_display = path.display().to_string();
    log_op_start!("read_layout_file", path = %path_display);

    let rows = File::open(path)
        .map_err(|e| io_error("open_layout", e))
        .and_then(read_rows);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &rows {
        Ok(rows) => {
            log_op_end!(
                "read_layout_file",
                duration_ms = duration_ms,
                row_count = rows.len()
            );
        }
        Err(err) => {
            log_op_error!(
                "read_layout_file",
                err.clone(),
                duration_ms = duration_ms,
                path = %path_display
            );
        }
    }
    rows
}

/// Read a placement file into a new store
///
/// # Errors
///
/// See [`read_layout_file`].
pub fn load_layout_file(path: &Path) -> Result<LoadOutcome> {
    read_layout_file(path).map(LayoutStore::from_rows)
}

/// Write a store as CSV, one row per record in store order
///
/// # Errors
///
/// Returns `Io`/`Parse` if the writer fails.
pub fn write_layout<W: Write>(store: &LayoutStore, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(OUTPUT_HEADER)
        .map_err(|e| csv_error("write_layout", e))?;
    for row in store.to_rows() {
        let cells = [
            row.reference_id,
            row.x,
            row.y,
            row.angle,
            row.value,
            row.unit,
        ]
        .map(Option::unwrap_or_default);
        wtr.write_record(&cells)
            .map_err(|e| csv_error("write_layout", e))?;
    }
    wtr.flush().map_err(|e| io_error("write_layout", e))?;
    Ok(())
}

/// Save a store to a file, replacing it atomically
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save_layout_file(store: &LayoutStore, path: &Path) -> Result<()> {
    let start = Instant::now();
    let path_display = path.display().to_string();
    log_op_start!("save_layout_file", path = %path_display, record_count = store.len());

    let result = write_file(store, path);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            log_op_end!("save_layout_file", duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!("save_layout_file", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn write_file(store: &LayoutStore, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_layout(store, &mut buf)?;
    atomic_write(path, &buf)
}
