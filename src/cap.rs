//! A configured size cap over a set of directory trees.
//!
//! # Example
//!
//! ```no_run
//! use dircap::cap::Cap;
//!
//! let cap = Cap::builder()
//!     .root("/var/cache/media")
//!     .root("/srv/mirror")
//!     .max_size(500 * 1024 * 1024 * 1024) // 500G
//!     .dry_run(true)
//!     .build()?;
//!
//! let report = cap.enforce()?;
//! println!("Would free {} bytes", report.bytes_freed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CapError, Result};
use crate::evict::{self, EvictionReport};
use crate::logging::Logger;
use crate::scan;

/// Size cap over one or more directory trees
#[derive(Debug, Clone)]
pub struct Cap {
    /// Directories whose combined size is capped
    roots: Vec<PathBuf>,
    /// Maximum combined size in bytes
    max_size: u64,
    /// Report what would be deleted without deleting
    dry_run: bool,
    /// Verbosity for stderr detail
    verbose: u8,
    /// Suppress report lines on stdout
    quiet: bool,
}

impl Cap {
    /// Creates a new builder for [`Cap`]
    pub fn builder() -> CapBuilder {
        CapBuilder::default()
    }

    /// Get the root directories
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Get the size limit in bytes
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Get the verbosity level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Scan every root, then evict least-recently-accessed files until the
    /// combined size is within [`Cap::max_size`].
    ///
    /// Per-file races and permission problems are reported and skipped; only
    /// unexpected I/O errors are returned.
    pub fn enforce(&self) -> Result<EvictionReport> {
        let log = Logger::new(self.verbose, self.quiet);

        log.verbose(
            1,
            format!(
                "Scanning {} root(s){}",
                self.roots.len(),
                if self.dry_run { " (dry run)" } else { "" }
            ),
        );
        let scan = scan::collect(&self.roots, self.verbose, self.quiet)?;

        if scan.skipped_dirs > 0 {
            log.verbose(
                1,
                format!("  {} directories could not be read", scan.skipped_dirs),
            );
        }

        evict::reduce(
            &self.roots,
            scan,
            self.max_size,
            self.dry_run,
            self.verbose,
            self.quiet,
        )
    }
}

/// Builder for [`Cap`]
#[derive(Debug, Default)]
pub struct CapBuilder {
    roots: Vec<PathBuf>,
    max_size: Option<u64>,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
}

impl CapBuilder {
    /// Add a root directory
    pub fn root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.roots.push(dir.into());
        self
    }

    /// Replace the root directories
    pub fn roots<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.roots = dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect();
        self
    }

    /// Set the size limit in bytes
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the [`Cap`]
    pub fn build(self) -> Result<Cap> {
        if self.roots.is_empty() {
            return Err(CapError::ConfigError(
                "at least one root directory is required".to_string(),
            ));
        }
        let max_size = self.max_size.ok_or(CapError::MissingLimit)?;

        Ok(Cap {
            roots: self.roots,
            max_size,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
