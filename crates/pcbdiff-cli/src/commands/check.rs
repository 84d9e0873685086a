//! Check command
//!
//! Usage: pcbdiff check <GOLDEN> <UNDER_TEST> [--output <FILE>]

use clap::Args;
use pcbdiff_core::{build_diff_table, compare_layouts, render_summary, DiffTable};
use pcbdiff_store::load_layout_file;
use std::path::PathBuf;

use super::{report_skipped, CmdResult};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Golden reference layout (file A)
    pub golden: PathBuf,

    /// Unit under test layout (file B)
    pub under_test: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute check command
///
/// The summary is written even when the layouts do not match; the command
/// then fails with the structural mismatch.
pub fn execute(args: CheckArgs) -> CmdResult {
    let golden = load_layout_file(&args.golden)?;
    report_skipped(&args.golden, &golden.report);
    let under_test = load_layout_file(&args.under_test)?;
    report_skipped(&args.under_test, &under_test.report);

    let result = compare_layouts(&golden.store, &under_test.store);
    let table = if result.is_valid() {
        build_diff_table(&result, &golden.store, &under_test.store)?
    } else {
        DiffTable::default()
    };
    let markdown = render_summary(&result, &table);

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &markdown)?;
        println!("✓ Summary written to {}", output_path.display());
    } else {
        print!("{}", markdown);
    }

    result.ensure_valid()?;
    Ok(())
}
