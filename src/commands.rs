//! Command execution for dircap.
//!
//! The binary parses a [`Cli`], and this module turns it into a validated
//! [`Cap`](crate::cap::Cap) and runs it.

use crate::cli::Cli;
use crate::error::Result;
use crate::evict::EvictionReport;

/// Validate the parsed arguments and enforce the cap.
///
/// Validation happens before any directory is read, so a bad limit or a
/// missing root never leads to a partial run.
pub fn execute(cli: &Cli) -> Result<EvictionReport> {
    let cap = cli.plan()?;
    cap.enforce()
}
