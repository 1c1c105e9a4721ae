//! Log subscriber setup for the `wraith` binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use wraith_foundation::{Error, Result};

/// Builds the log filter: `RUST_LOG` if set and valid, else `fallback`,
/// else `warn`.
#[must_use]
pub fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs a stderr `fmt` subscriber filtered by [`log_filter`].
///
/// # Errors
/// Returns a config error if a global subscriber is already installed.
pub fn init_logging(fallback: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(log_filter(fallback))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| Error::config(format!("cannot install log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_fallback_still_builds_a_filter() {
        let filter = log_filter("not a [valid filter");
        assert!(!filter.to_string().is_empty());
    }
}
