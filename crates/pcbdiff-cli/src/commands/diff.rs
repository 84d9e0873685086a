//! Diff command
//!
//! Usage: pcbdiff diff <GOLDEN> <UNDER_TEST> [--sort <COLUMN>] [--desc] [--json]

use clap::Args;
use pcbdiff_core::model::RawRow;
use pcbdiff_core::projection::{DiffColumn, SortOrder};
use pcbdiff_core::{apply, Command, CommandOutcome, Session};
use pcbdiff_core_types::Slot;
use pcbdiff_store::read_layout_file;
use std::path::{Path, PathBuf};

use super::{report_skipped, CmdResult};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Golden reference layout (file A)
    pub golden: PathBuf,

    /// Unit under test layout (file B)
    pub under_test: PathBuf,

    /// Column to sort by: reference, old-value, old-unit, new-value, new-unit
    #[arg(short, long, default_value = "reference")]
    pub sort: DiffColumn,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Print JSON instead of a text table
    #[arg(long)]
    pub json: bool,
}

/// Load A then B into a session, reporting skipped rows
pub fn load_pair(golden: &Path, under_test: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::new();
    for (slot, path) in [(Slot::A, golden), (Slot::B, under_test)] {
        let rows: Vec<RawRow> = read_layout_file(path)?;
        let (next, outcome) = apply(session, Command::LoadLayout { slot, rows })?;
        if let CommandOutcome::Loaded { report, .. } = &outcome {
            report_skipped(path, report);
        }
        session = next;
    }
    Ok(session)
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> CmdResult {
    let mut session = load_pair(&args.golden, &args.under_test)?;
    let mut table = session.differences()?;
    let order = if args.desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    table.sort_by(args.sort, order);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No differences.");
    } else {
        println!(
            "{:<12} {:<12} {:<10} {:<12} {:<10}",
            "Reference", "Old Value", "Old Unit", "New Value", "New Unit"
        );
        for row in &table.rows {
            println!(
                "{:<12} {:<12} {:<10} {:<12} {:<10}",
                row.reference_id, row.old_value, row.old_unit, row.new_value, row.new_unit
            );
        }
    }
    for row in &table.unmatched {
        println!("unmatched: {} ({})", row.reference_id, row.presence.as_str());
    }
    Ok(())
}
