//! Log subscriber setup for the binary

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "richcluster=warn",
        1 => "richcluster=info",
        2 => "richcluster=debug",
        _ => "richcluster=trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over the verbosity default.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stderr_log)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "richcluster=warn");
        assert_eq!(default_filter(2), "richcluster=debug");
        assert_eq!(default_filter(9), "richcluster=trace");
    }
}
