//! Command-line interface definitions for dircap.
//!
//! The CLI takes one or more directories and a size limit. The limit can be
//! given with `--max-size`, or, for older crontabs, as the final positional
//! argument. When `--max-size` is present every positional is a directory.
//!
//! # Example
//!
//! ```no_run
//! use dircap::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! let cap = cli.plan()?;
//! println!("Capping {:?} at {} bytes", cap.roots(), cap.max_size());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::cap::Cap;
use crate::error::{CapError, Result};
use crate::size::parse_size;

/// Main command-line interface for dircap.
#[derive(Debug, Parser)]
#[command(
    name = "dircap",
    bin_name = "dircap",
    author,
    version,
    about = "Cap directory trees at a byte limit by evicting least-recently-accessed files",
    long_about = None
)]
pub struct Cli {
    /// One or more directories to manage; optionally end with MAX_SIZE for
    /// legacy usage
    #[arg(required = true, num_args = 1.., value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Maximum combined size (e.g. 2.5T, 500G, 1048576)
    #[arg(short = 'm', long, value_name = "SIZE", env = "DIRCAP_MAX_SIZE")]
    max_size: Option<String>,

    /// Show what would be deleted without deleting anything
    #[arg(long, env = "DIRCAP_DRY_RUN")]
    dry_run: bool,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "DIRCAP_VERBOSE")]
    verbose: u8,

    /// Silence report output; errors are still printed
    #[arg(short, long, conflicts_with = "verbose", env = "DIRCAP_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse the process arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Get the raw positional arguments
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Get the `--max-size` literal, if given
    pub fn max_size(&self) -> Option<&str> {
        self.max_size.as_deref()
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Split the positionals into root directories and the byte limit.
    ///
    /// With `--max-size` every positional is a root. Without it the last
    /// positional is parsed as the limit and at least one root must precede
    /// it.
    pub fn resolve_limit(&self) -> Result<(&[PathBuf], u64)> {
        if let Some(literal) = self.max_size() {
            return Ok((&self.paths, parse_size(literal)?));
        }

        let [roots @ .., last] = self.paths.as_slice() else {
            return Err(CapError::MissingLimit);
        };
        if roots.is_empty() {
            return Err(CapError::MissingLimit);
        }

        let literal = last.to_str().ok_or_else(|| {
            CapError::InvalidSize(
                last.to_string_lossy().into_owned(),
                "not valid UTF-8".to_string(),
            )
        })?;

        Ok((roots, parse_size(literal)?))
    }

    /// Resolve and validate everything needed for a run.
    ///
    /// Fails before touching the trees if the limit cannot be resolved or if
    /// any root is not an existing directory; all offending roots are
    /// reported together.
    pub fn plan(&self) -> Result<Cap> {
        let (roots, max_size) = self.resolve_limit()?;

        let missing: Vec<PathBuf> = roots
            .iter()
            .filter(|p| !p.is_dir())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(CapError::NotADirectory(missing));
        }

        let verbose = if self.quiet { 0 } else { self.verbose };

        Cap::builder()
            .roots(roots)
            .max_size(max_size)
            .dry_run(self.dry_run)
            .verbose(verbose)
            .quiet(self.quiet)
            .build()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    paths: Vec<PathBuf>,
    max_size: Option<String>,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
}

impl CliBuilder {
    /// Append a positional argument (a directory, or a trailing size literal)
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Set the `--max-size` literal
    pub fn max_size(mut self, literal: impl Into<String>) -> Self {
        self.max_size = Some(literal.into());
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        if self.paths.is_empty() {
            return Err(CapError::ConfigError(
                "At least one path is required".to_string(),
            ));
        }

        Ok(Cli {
            paths: self.paths,
            max_size: self.max_size,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
