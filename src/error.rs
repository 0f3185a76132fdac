//! Error types for dircap.
//!
//! This module defines the error type used throughout dircap, using a
//! combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (bad size literal, missing limit, non-directory
//!   roots) are fatal and surface before any scan starts
//! - Expected per-file races (vanished files, permission denials) are not
//!   errors at all; the scan and eviction code models them as outcome enums
//! - Anything else the OS reports is wrapped in [`CapError::Io`] and ends the
//!   run
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dircap::error::{CapError, Result};
//!
//! fn check_root(path: &Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(CapError::NotADirectory(vec![path.to_path_buf()]));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in dircap operations
#[derive(Error, Debug, Diagnostic)]
pub enum CapError {
    /// A size literal could not be parsed.
    ///
    /// Raised for both `--max-size` and the legacy trailing positional.
    /// Accepted forms are a bare integer byte count or a (possibly
    /// fractional) number followed by one of `k`, `m`, `g`, `t`.
    #[error("Invalid size: '{0}' - {1}")]
    #[diagnostic(
        code(dircap::size::invalid),
        help("Specify a size as raw bytes or a number with a K/M/G/T suffix (e.g. '1048576', '500G', '2.5T')")
    )]
    InvalidSize(
        /// The literal as given on the command line
        String,
        /// Description of the parsing error
        String,
    ),

    /// No byte limit could be resolved from the arguments.
    #[error("No size limit given")]
    #[diagnostic(
        code(dircap::config::missing_limit),
        help("Provide --max-size or supply MAX_SIZE as the final positional argument.")
    )]
    MissingLimit,

    /// One or more root arguments are not existing directories.
    #[error("Not a directory: {}", display_paths(.0))]
    #[diagnostic(
        code(dircap::config::not_a_directory),
        help("Every path argument must name an existing directory.")
    )]
    NotADirectory(
        /// Every offending path, in argument order
        Vec<PathBuf>,
    ),

    /// File system I/O error that is not one of the tolerated races.
    ///
    /// Vanished files and permission denials are handled where they occur;
    /// this variant carries everything else (I/O errors from a failing disk,
    /// `ELOOP`, exhausted file descriptors, ...).
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(dircap::io_error))]
    Io {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Programmatic configuration is incomplete.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(dircap::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CapError>;
