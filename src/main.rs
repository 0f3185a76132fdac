//! # dircap CLI
//!
//! Caps one or more directory trees at a byte limit by deleting the
//! least-recently-accessed files first. Meant to run from cron:
//!
//! ```bash
//! # every hour, keep two mirrors under 2.4T combined
//! 0 * * * * dircap /srv/mirror/a /srv/mirror/b --max-size 2.4T >> /var/log/dircap.log 2>&1
//!
//! # see what would go, without deleting
//! dircap /var/cache --max-size 500G --dry-run
//!
//! # legacy form: the limit as the final positional
//! dircap /var/cache /tmp/cache 500G
//! ```
//!
//! ## Environment Variables
//!
//! - `DIRCAP_MAX_SIZE`: Size limit (same as `--max-size`)
//! - `DIRCAP_DRY_RUN`: Report without deleting
//! - `DIRCAP_VERBOSE`: Enable verbose output
//! - `DIRCAP_QUIET`: Silence report output except for errors

use std::io::IsTerminal;

use dircap::cli::Cli;

fn main() -> miette::Result<()> {
    // Route panics through miette so cron logs get the same report format
    miette::set_panic_hook();

    // Pick the error report handler based on where stderr ends up
    // Interactive runs get unicode framing and source context
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Plain output when stderr is redirected to a log file (cron, systemd)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    // Parse command line arguments and environment
    let cli = Cli::parse_args();

    // Validate the roots and the limit, then scan and evict
    let result = dircap::commands::execute(&cli);

    // The report has already been printed; only the error matters here
    result.map(|_report| ()).map_err(Into::into)
}
