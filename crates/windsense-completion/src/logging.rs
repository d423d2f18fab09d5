//! Logging setup for hosts that do not install their own subscriber

use tracing_subscriber::fmt;

use crate::types::{CompletionError, CompletionResult};

/// Install a `tracing` subscriber writing to stderr.
///
/// `level` is one of `trace`, `debug`, `info`, `warn` or `error`; anything else
/// falls back to `info`. Fails if a global subscriber is already installed.
pub fn init_logging(level: &str, verbose: bool) -> CompletionResult<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CompletionError::InternalError(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        assert!(init_logging("nonsense", true).is_ok());
        assert!(matches!(
            init_logging("debug", false),
            Err(CompletionError::InternalError(_))
        ));
    }
}
