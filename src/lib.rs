//! # dircap
//!
//! Keeps one or more directory trees under a combined byte limit by deleting
//! the least-recently-accessed files first.
//!
//! ## Overview
//!
//! dircap is a maintenance tool meant to run unattended, typically from cron,
//! against trees that other processes are reading and writing at the same
//! time. Every invocation starts from scratch: it walks the trees, adds up
//! the size of every regular file, and if the total is over the limit it
//! deletes files in order of last access time until it no longer is.
//!
//! ## Key Features
//!
//! - **Strict LRU**: oldest access time goes first, and deletion stops the
//!   moment the total is within the limit
//! - **Race tolerant**: files that vanish mid-run are skipped, unreadable
//!   directories and undeletable files are reported and skipped
//! - **Dry run**: reports exactly what a live run would free
//! - **No recursion**: traversal uses an explicit stack, so deep trees are fine
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Turns parsed arguments into a run
//! - [`cap`]: The configured cap and its `enforce` entry point
//! - [`scan`]: Collects file sizes and access times
//! - [`evict`]: Ranks and deletes files
//! - [`size`]: Size literals and human-readable sizes
//! - [`error`]: Error types and handling with thiserror + miette
//!
//! ## Library Usage
//!
//! ```no_run
//! use dircap::cli::Cli;
//! use dircap::commands;
//!
//! let cli = Cli::builder()
//!     .path("/var/cache/media")
//!     .max_size("500G")
//!     .dry_run(true)
//!     .build()?;
//!
//! let report = commands::execute(&cli)?;
//! println!("Would free {} bytes", report.bytes_freed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cap;
pub mod cli;
pub mod commands;
pub mod error;
pub mod evict;
pub mod scan;
pub mod size;

// Internal modules
mod logging;
