//! Edit command
//!
//! Usage: pcbdiff edit <FILE> <REF> [--value <TEXT>] [--unit <UNIT>] [--angle <DEG>]
//!        [--x <X> --y <Y>] [--type <TYPE>] [--output <FILE>]

use clap::Args;
use pcbdiff_core::{apply, Command, CommandOutcome, ComponentType, RecordUpdate, Session};
use pcbdiff_core_types::Slot;
use pcbdiff_store::{read_layout_file, save_layout_file};
use std::path::PathBuf;

use super::CmdResult;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Layout to edit
    pub file: PathBuf,

    /// Reference designator of the component to change
    pub reference_id: String,

    /// New value; combined text such as "220nF" also sets the unit
    #[arg(long)]
    pub value: Option<String>,

    /// New unit
    #[arg(long)]
    pub unit: Option<String>,

    /// New rotation in degrees
    #[arg(long)]
    pub angle: Option<String>,

    /// New X coordinate
    #[arg(long, requires = "y", allow_hyphen_values = true)]
    pub x: Option<String>,

    /// New Y coordinate
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Component type; resets the unit to the type's default unless --unit is given
    #[arg(long = "type")]
    pub component_type: Option<ComponentType>,

    /// Output file path (default: overwrite FILE)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EditArgs {
    fn to_update(&self) -> RecordUpdate {
        let mut update = RecordUpdate::new();
        if let Some(text) = &self.value {
            update = update.with_value_text(text);
        }
        if let Some(unit) = &self.unit {
            update = update.with_unit(unit.as_str());
        }
        if let Some(angle) = &self.angle {
            update = update.with_angle(angle.as_str());
        }
        if let (Some(x), Some(y)) = (&self.x, &self.y) {
            update = update.with_position(x.as_str(), y.as_str());
        }
        if let Some(ty) = self.component_type {
            update = update.with_component_type(ty);
        }
        update
    }
}

/// Execute edit command
pub fn execute(args: EditArgs) -> CmdResult {
    let update = args.to_update();
    if update.is_empty() {
        return Err("nothing to change: pass at least one of --value, --unit, --angle, --x/--y, --type".into());
    }

    let rows = read_layout_file(&args.file)?;
    let (session, _) = apply(Session::new(), Command::LoadLayout { slot: Slot::A, rows })?;
    let (session, outcome) = apply(
        session,
        Command::UpdateRecord {
            slot: Slot::A,
            reference_id: args.reference_id.clone(),
            update,
        },
    )?;

    let target = args.output.as_ref().unwrap_or(&args.file);
    save_layout_file(session.store(Slot::A)?, target)?;

    if let CommandOutcome::Updated { outcome, .. } = outcome {
        let moved = if outcome.position_changed { " (moved)" } else { "" };
        println!(
            "✓ Updated {}{} in {}",
            args.reference_id,
            moved,
            target.display()
        );
    }
    Ok(())
}
