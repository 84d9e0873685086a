//! Normalize command
//!
//! Usage: pcbdiff normalize <INPUT> <OUTPUT>

use clap::Args;
use pcbdiff_store::{load_layout_file, save_layout_file};
use std::path::PathBuf;

use super::{report_skipped, CmdResult};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Layout to read
    pub input: PathBuf,

    /// Where to write the canonical layout
    pub output: PathBuf,
}

/// Execute normalize command
///
/// Skipped rows are dropped and duplicate references collapse to one row.
pub fn execute(args: NormalizeArgs) -> CmdResult {
    let outcome = load_layout_file(&args.input)?;
    report_skipped(&args.input, &outcome.report);
    save_layout_file(&outcome.store, &args.output)?;
    println!(
        "✓ {} records written to {}",
        outcome.store.len(),
        args.output.display()
    );
    Ok(())
}
