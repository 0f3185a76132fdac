//! LRU eviction over a finished scan.
//!
//! Records are ranked by last access time, oldest first, and removed one at a
//! time until the running total is at or below the limit. Nothing newer than
//! the file that crossed the threshold is touched.
//!
//! Deletion is attempted exactly once per candidate. The outcome is one of:
//!
//! - **Removed**: the bytes are freed by this run.
//! - **Already gone**: someone else removed the file after the scan. The bytes
//!   are gone, so the running total still drops, but the file is tallied
//!   separately from what this run freed.
//! - **Denied**: the file stays; the total is unchanged and the next candidate
//!   is tried.
//!
//! Any other failure ends the run with [`CapError::Io`].

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use filetime::FileTime;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{CapError, Result};
use crate::logging::Logger;
use crate::scan::ScanResult;
use crate::size::format_size;

/// Outcome of a single deletion attempt.
#[derive(Debug)]
pub enum Removal {
    /// The file was deleted by this run
    Removed,
    /// The file no longer existed
    AlreadyGone,
    /// The OS refused to delete the file
    Denied(io::Error),
}

/// Summary of an eviction pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvictionReport {
    /// Aggregate size before eviction
    pub initial_total: u64,
    /// Aggregate size after eviction (as accounted, not re-scanned)
    pub final_total: u64,
    /// The byte limit that was enforced
    pub limit: u64,
    /// Files deleted by this run (or that would be, in a dry run)
    pub files_removed: usize,
    /// Bytes freed by this run (or that would be, in a dry run)
    pub bytes_freed: u64,
    /// Candidates that had already disappeared when we got to them
    pub already_gone: usize,
    /// Bytes accounted to `already_gone`
    pub already_gone_bytes: u64,
    /// Candidates that could not be deleted
    pub failed: usize,
    /// Bytes held by `failed` candidates
    pub failed_bytes: u64,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl EvictionReport {
    /// True when the accounted final total is within the limit.
    pub fn within_limit(&self) -> bool {
        self.final_total <= self.limit
    }
}

/// Bring the total described by `scan` down to `limit`, oldest access first.
///
/// `roots` is only used for the opening status line.
pub fn reduce(
    roots: &[PathBuf],
    scan: ScanResult,
    limit: u64,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
) -> Result<EvictionReport> {
    reduce_with(roots, scan, limit, dry_run, verbose, quiet, |path| {
        fs::remove_file(path)
    })
}

/// [`reduce`] with a caller-supplied deletion primitive.
pub(crate) fn reduce_with<F>(
    roots: &[PathBuf],
    scan: ScanResult,
    limit: u64,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
    mut remove: F,
) -> Result<EvictionReport>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let log = Logger::new(verbose, quiet);
    let ScanResult {
        total_bytes,
        mut records,
        ..
    } = scan;

    let joined = roots
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    log.report(format!(
        "Current size across {} dir(s) [{joined}]: {}; limit: {}",
        roots.len(),
        format_size(total_bytes),
        format_size(limit)
    ));

    let mut report = EvictionReport {
        initial_total: total_bytes,
        final_total: total_bytes,
        limit,
        dry_run,
        ..EvictionReport::default()
    };

    if total_bytes <= limit {
        log.report("Nothing to delete.");
        return Ok(report);
    }

    log.verbose(
        1,
        format!(
            "  Need to free: {} from {} candidate(s)",
            format_size(total_bytes - limit),
            records.len()
        ),
    );

    records.sort_by_key(|record| record.accessed);

    let mut total = total_bytes;
    for record in &records {
        if total <= limit {
            break;
        }

        let atime = format_atime(record.accessed);
        let size = format_size(record.size);

        if dry_run {
            log.report(format!(
                "[dry-run] would delete {} (atime={atime}, size={size})",
                record.path.display()
            ));
            report.files_removed += 1;
            report.bytes_freed += record.size;
            total = total.saturating_sub(record.size);
            continue;
        }

        match classify(&record.path, remove(&record.path))? {
            Removal::Removed => {
                log.report(format!(
                    "deleted {} (atime={atime}, size={size})",
                    record.path.display()
                ));
                report.files_removed += 1;
                report.bytes_freed += record.size;
                total = total.saturating_sub(record.size);
            }
            Removal::AlreadyGone => {
                log.warn(format!("already gone: {}", record.path.display()));
                report.already_gone += 1;
                report.already_gone_bytes += record.size;
                total = total.saturating_sub(record.size);
            }
            Removal::Denied(err) => {
                log.warn(format!("cannot delete {}: {err}", record.path.display()));
                report.failed += 1;
                report.failed_bytes += record.size;
            }
        }
    }

    report.final_total = total;

    log.report(format!(
        "{} {} by removing {} file(s). Final size: {}",
        if dry_run { "Would free" } else { "Freed" },
        format_size(report.bytes_freed),
        report.files_removed,
        format_size(report.final_total)
    ));
    if report.already_gone > 0 {
        log.report(format!(
            "{} file(s) ({}) were already gone",
            report.already_gone,
            format_size(report.already_gone_bytes)
        ));
    }
    if report.failed > 0 {
        log.report(format!(
            "{} file(s) ({}) could not be deleted",
            report.failed,
            format_size(report.failed_bytes)
        ));
    }

    Ok(report)
}

fn classify(path: &Path, result: io::Result<()>) -> Result<Removal> {
    match result {
        Ok(()) => Ok(Removal::Removed),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Removal::AlreadyGone),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => Ok(Removal::Denied(err)),
        Err(source) => Err(CapError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Render an access time as `YYYY-MM-DD HH:MM:SS` (UTC).
fn format_atime(time: FileTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(time.unix_seconds())
        .ok()
        .and_then(|dt| dt.format(format).ok())
        .unwrap_or_else(|| time.unix_seconds().to_string())
}
