//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,quotetag=debug";

/// Test default: codec events only.
const TEST_FILTER: &str = "quotetag=debug";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize structured logging.
///
/// JSON output when `RUST_ENV=production`, pretty output otherwise.
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> TelemetryResult<()> {
    let is_production = std::env::var("RUST_ENV").is_ok_and(|v| v == "production");

    let result = if is_production {
        tracing_subscriber::registry()
            .with(env_filter(DEFAULT_FILTER))
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter(DEFAULT_FILTER))
            .with(fmt::layer().pretty().with_target(true))
            .try_init()
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Install a compact subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    // Tests share one process; every call after the first finds a subscriber
    // already installed, which is the expected outcome.
    let _ = tracing_subscriber::registry()
        .with(env_filter(TEST_FILTER))
        .with(fmt::layer().compact().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        init_test_logging();
        init_test_logging();

        let err = init_logging().unwrap_err();
        assert!(matches!(err, TelemetryError::LoggingInit(_)));
    }
}
