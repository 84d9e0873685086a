//! Geometry command
//!
//! Usage: pcbdiff geometry <FILE> --width <PX> --height <PX> [--golden <FILE>] [--config <JSON>]

use clap::Args;
use pcbdiff_core::geometry::LayoutGeometry;
use pcbdiff_core::projection::RecordHighlight;
use pcbdiff_core::{apply, Command, GeometryConfig, Session, Viewport};
use pcbdiff_core_types::Slot;
use pcbdiff_store::read_layout_file;
use serde::Serialize;
use std::path::PathBuf;

use super::CmdResult;

#[derive(Debug, Args)]
pub struct GeometryArgs {
    /// Layout to project
    pub file: PathBuf,

    /// Drawing surface width in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Drawing surface height in pixels
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Golden layout; when given, FILE is viewed as the unit under test and
    /// highlight classes are included
    #[arg(long)]
    pub golden: Option<PathBuf>,

    /// Geometry config as a JSON file (margin and footprint sizes)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GeometryReport<'a> {
    slot: Slot,
    geometry: &'a LayoutGeometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlights: Option<Vec<RecordHighlight>>,
}

fn load_config(args: &GeometryArgs) -> Result<GeometryConfig, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(GeometryConfig::default()),
    }
}

/// Execute geometry command
pub fn execute(args: GeometryArgs) -> CmdResult {
    let viewport = Viewport::new(args.width, args.height)?;
    let mut session = Session::with_config(load_config(&args)?)?;

    let slot = match &args.golden {
        Some(golden) => {
            let rows = read_layout_file(golden)?;
            session = apply(session, Command::LoadLayout { slot: Slot::A, rows })?.0;
            Slot::B
        }
        None => Slot::A,
    };
    let rows = read_layout_file(&args.file)?;
    session = apply(session, Command::LoadLayout { slot, rows })?.0;

    let highlights = match slot {
        Slot::B => Some(session.highlights(Slot::B)?),
        Slot::A => None,
    };
    let geometry = session.geometry(slot, viewport)?;
    let report = GeometryReport {
        slot,
        geometry,
        highlights,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
