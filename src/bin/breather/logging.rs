// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

use std::path::Path;

use flexi_logger::{Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle};

/// Log level for the given verbosity.
fn level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start logging into stderr, optionally duplicated into a file.
/// The returned handle must be kept alive for the whole run.
pub fn setup_logging(
    verbosity: u8,
    quiet: bool,
    log_file: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_str(level(verbosity, quiet))?;

    match log_file {
        None => logger.log_to_stderr().start(),
        Some(path) => logger
            .log_to_file(FileSpec::try_from(path)?)
            .duplicate_to_stderr(Duplicate::All)
            .format_for_files(flexi_logger::detailed_format)
            .start(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level(0, false), "warn");
        assert_eq!(level(1, false), "info");
        assert_eq!(level(2, false), "debug");
        assert_eq!(level(5, false), "trace");
        assert_eq!(level(0, true), "error");
    }
}
