//! Inventory of the regular files under a set of root directories.
//!
//! The walk is iterative: directories are pushed onto an explicit stack rather
//! than recursed into, so tree depth never grows the call stack. Symbolic
//! links are never followed, neither for the type check nor for the size and
//! access time.
//!
//! The tree may be changing underneath the walk. A file or directory that
//! disappears between being listed and being inspected is skipped silently,
//! and a directory we are not allowed to read is reported on stderr and
//! skipped. Both leave the rest of the scan untouched.

use std::fs::{self, DirEntry, ReadDir};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{CapError, Result};
use crate::logging::Logger;

/// A regular file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Last access time, as reported by `lstat`
    pub accessed: FileTime,
    /// Size in bytes
    pub size: u64,
    /// Path as discovered (a root joined with the entry names below it)
    pub path: PathBuf,
}

/// Everything a scan found, in traversal order.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sum of `size` over `records`
    pub total_bytes: u64,
    /// One record per regular file
    pub records: Vec<FileRecord>,
    /// Directories that could not be listed
    pub skipped_dirs: usize,
}

/// Outcome of trying to list a directory.
enum Listing {
    Entries(ReadDir),
    Denied(io::Error),
    Vanished,
}

/// Outcome of inspecting one directory entry.
enum Inspection {
    File(FileRecord),
    Directory(PathBuf),
    Other,
    Denied(io::Error),
    Vanished,
}

/// Walk `roots` and return every regular file below them together with the
/// total size.
///
/// # Errors
///
/// Only I/O failures other than a vanished entry or a permission denial are
/// returned; those two are handled in place.
pub fn collect(roots: &[PathBuf], verbose: u8, quiet: bool) -> Result<ScanResult> {
    collect_with(roots, verbose, quiet, |dir| fs::read_dir(dir))
}

/// [`collect`] with a caller-supplied directory listing primitive.
pub(crate) fn collect_with<F>(
    roots: &[PathBuf],
    verbose: u8,
    quiet: bool,
    mut read_dir: F,
) -> Result<ScanResult>
where
    F: FnMut(&Path) -> io::Result<ReadDir>,
{
    let log = Logger::new(verbose, quiet);
    let mut result = ScanResult::default();
    let mut stack: Vec<PathBuf> = roots.to_vec();

    while let Some(dir) = stack.pop() {
        log.verbose(2, format!("  Scanning {}", dir.display()));

        let entries = match list_dir(&dir, read_dir(&dir))? {
            Listing::Entries(entries) => entries,
            Listing::Denied(err) => {
                log.warn(format!("skip {}: {err}", dir.display()));
                result.skipped_dirs += 1;
                continue;
            }
            Listing::Vanished => {
                log.verbose(1, format!("  {} disappeared before it was listed", dir.display()));
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.kind() == ErrorKind::NotFound => break,
                Err(source) => return Err(CapError::Io { path: dir, source }),
            };

            match inspect_entry(&entry)? {
                Inspection::Directory(path) => stack.push(path),
                Inspection::File(record) => {
                    result.total_bytes += record.size;
                    result.records.push(record);
                }
                Inspection::Denied(err) => {
                    log.warn(format!("skip {}: {err}", entry.path().display()));
                }
                Inspection::Other | Inspection::Vanished => {}
            }
        }
    }

    log.verbose(
        1,
        format!(
            "  Found {} files in {} root(s)",
            result.records.len(),
            roots.len()
        ),
    );

    Ok(result)
}

fn list_dir(dir: &Path, listing: io::Result<ReadDir>) -> Result<Listing> {
    match listing {
        Ok(entries) => Ok(Listing::Entries(entries)),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => Ok(Listing::Denied(err)),
        // Removed, or replaced by something that is no longer a directory.
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Ok(Listing::Vanished)
        }
        Err(source) => Err(CapError::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn inspect_entry(entry: &DirEntry) -> Result<Inspection> {
    let classify = || -> io::Result<Inspection> {
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            return Ok(Inspection::Directory(entry.path()));
        }
        if !file_type.is_file() {
            return Ok(Inspection::Other);
        }

        // DirEntry::metadata does not traverse symlinks.
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            return Ok(Inspection::Other);
        }

        Ok(Inspection::File(FileRecord {
            accessed: FileTime::from_last_access_time(&metadata),
            size: metadata.len(),
            path: entry.path(),
        }))
    };

    match classify() {
        Ok(found) => Ok(found),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Inspection::Vanished),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => Ok(Inspection::Denied(err)),
        Err(source) => Err(CapError::Io {
            path: entry.path(),
            source,
        }),
    }
}
