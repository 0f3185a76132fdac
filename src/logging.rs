use std::fmt::Display;

/// Output stream a line is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

/// Output sink for a run.
///
/// Report lines go to stdout so cron can redirect them to a log; diagnostics
/// go to stderr and are never silenced.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn report(&self, message: impl Display) {
        if !self.quiet {
            emit(Stream::Stdout, message);
        }
    }

    pub fn warn(&self, message: impl Display) {
        emit(Stream::Stderr, message);
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if !self.quiet && self.verbose >= level {
            emit(Stream::Stderr, message);
        }
    }
}

fn emit(stream: Stream, message: impl Display) {
    #[cfg(test)]
    if capture::record(stream, &message) {
        return;
    }

    match stream {
        Stream::Stdout => println!("{message}"),
        Stream::Stderr => eprintln!("{message}"),
    }
}
