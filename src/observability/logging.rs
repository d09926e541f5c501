//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Resolve the log filter from the environment or configuration
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the log filter: `RUST_LOG` if set and valid, else the configured
/// level, else `info`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(env.as_deref(), &config.log_level)
}

fn resolve_filter(env: Option<&str>, level: &str) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let filter = resolve_filter(None, "my_crate=loud");
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_configured_level_used_without_env() {
        let filter = resolve_filter(None, "debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_env_directives_win() {
        let filter = resolve_filter(Some("warn"), "debug");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_env_falls_back_to_configured_level() {
        let filter = resolve_filter(Some("my_crate=loud"), "error");
        assert_eq!(filter.to_string(), "error");
    }
}
