use pcbdiff_core::model::RawRow;
use pcbdiff_core::ops::LayoutStore;
use pcbdiff_core::{apply, Command, Session};
use pcbdiff_core_types::Slot;

/// Parse `"C1,1200,3100,0,100,nF"` into a raw row (no quoting)
#[allow(dead_code)]
pub fn row(line: &str) -> RawRow {
    let mut cells: Vec<&str> = line.split(',').collect();
    cells.resize(6, "");
    RawRow::from_cells(cells[0], cells[1], cells[2], cells[3], cells[4], cells[5])
}

#[allow(dead_code)]
pub fn rows(lines: &[&str]) -> Vec<RawRow> {
    lines.iter().map(|l| row(l)).collect()
}

/// Build a store from table lines, dropping the load report
#[allow(dead_code)]
pub fn store(lines: &[&str]) -> LayoutStore {
    LayoutStore::from_rows(rows(lines)).store
}

/// A session with A and B loaded through `apply`
#[allow(dead_code)]
pub fn session_with(golden: &[&str], under_test: &[&str]) -> Session {
    let (session, _) = apply(
        Session::new(),
        Command::LoadLayout {
            slot: Slot::A,
            rows: rows(golden),
        },
    )
    .unwrap();
    let (session, _) = apply(
        session,
        Command::LoadLayout {
            slot: Slot::B,
            rows: rows(under_test),
        },
    )
    .unwrap();
    session
}
