//! Functional-boundary apply function
//!
//! `apply()` is the canonical entry point for session mutations. It takes
//! ownership of the current session, runs one command and hands the session
//! back with what the command did.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: a failed command commits nothing. Loads are built
//!   and validated before they replace a slot; edits are validated before
//!   they touch a record.
//! - **No panics**: invalid input returns typed errors.
//!
//! ## Example
//!
//! ```
//! use pcbdiff_core::{apply, Command, Session};
//! use pcbdiff_core::model::RawRow;
//! use pcbdiff_core_types::Slot;
//!
//! let cmd = Command::LoadLayout {
//!     slot: Slot::A,
//!     rows: vec![RawRow::from_cells("C1", "1200", "3100", "0", "100", "nF")],
//! };
//! let (session, _outcome) = apply(Session::new(), cmd).unwrap();
//! assert!(session.is_loaded(Slot::A));
//! ```

use std::time::Instant;

use crate::commands::{Command, CommandOutcome};
use crate::errors::Result;
use crate::session::Session;
use crate::{log_op_end, log_op_error, log_op_start};

/// Apply a command to a session, returning the new session state
///
/// On `Err` nothing was committed; callers that need to keep going after a
/// rejected command should clone the session first or use
/// [`Session::execute`] on a mutable session.
///
/// # Errors
///
/// See [`Session::execute`].
pub fn apply(mut session: Session, cmd: Command) -> Result<(Session, CommandOutcome)> {
    let start = Instant::now();
    let command = cmd.name();
    log_op_start!("apply", command = command);

    match session.execute(cmd) {
        Ok(outcome) => {
            log_op_end!(
                "apply",
                duration_ms = start.elapsed().as_millis() as u64,
                command = command
            );
            Ok((session, outcome))
        }
        Err(err) => {
            log_op_error!(
                "apply",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                command = command
            );
            Err(err)
        }
    }
}
