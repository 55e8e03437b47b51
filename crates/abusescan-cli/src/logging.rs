//! Tracing subscriber setup.

use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`. Logs go to stderr so stdout stays clean for output.
pub fn init(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(use_ansi(no_color, io::stderr().is_terminal()))
        .with_writer(io::stderr)
        .try_init();
}

/// Escape codes only for a terminal, and never with `--no-color`.
const fn use_ansi(no_color: bool, stderr_is_terminal: bool) -> bool {
    !no_color && stderr_is_terminal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_only_on_colored_terminal() {
        assert!(use_ansi(false, true));
        assert!(!use_ansi(true, true));
        assert!(!use_ansi(false, false));
        assert!(!use_ansi(true, false));
    }
}
