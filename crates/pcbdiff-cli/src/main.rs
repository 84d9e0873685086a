//! pcbdiff CLI
//!
//! Command-line interface for comparing PCB placement files

use clap::{Parser, Subcommand, ValueEnum};
use pcbdiff_core::errors::{ExError, ExErrorKind, PcbDiffError};
use pcbdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pcbdiff")]
#[command(about = "pcbdiff - Compare a golden PCB layout with a unit under test", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate two layouts and print a Markdown comparison summary
    Check(commands::check::CheckArgs),
    /// Print the differences table for two layouts
    Diff(commands::diff::DiffArgs),
    /// Print screen geometry for a layout as JSON
    Geometry(commands::geometry::GeometryArgs),
    /// Load a layout and write it back in canonical form
    Normalize(commands::normalize::NormalizeArgs),
    /// Edit one component and save the layout
    Edit(commands::edit::EditArgs),
}

/// Exit code for a failed command: 2 means "wrong board or revision"
fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    let structural = err
        .downcast_ref::<PcbDiffError>()
        .map(|e| matches!(e, PcbDiffError::StructuralMismatch { .. }))
        .or_else(|| {
            err.downcast_ref::<ExError>()
                .map(|e| e.kind() == ExErrorKind::StructuralMismatch)
        })
        .unwrap_or(false);
    if structural {
        2
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Geometry(args) => commands::geometry::execute(args),
        Commands::Normalize(args) => commands::normalize::execute(args),
        Commands::Edit(args) => commands::edit::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(e.as_ref()));
    }
}
