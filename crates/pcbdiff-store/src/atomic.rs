//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// The temp file sits next to the target so the rename stays on one
/// filesystem. An existing target is replaced only once the write succeeded.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", e))?;
    }

    let mut temp_name = target_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content).map_err(|e| io_error("write_layout_temp", e))?;
    if let Err(e) = fs::rename(temp_path, target_path) {
        let _ = fs::remove_file(temp_path);
        return Err(io_error("rename_layout_temp", e));
    }

    Ok(())
}
