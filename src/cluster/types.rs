//! Cluster construction errors.

use thiserror::Error;

use crate::driver::DriverError;

/// Errors raised while building a host connector set.
///
/// Construction is all-or-nothing: any of these means no set was produced.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No endpoints were supplied.
    #[error("multi host endpoint list should not be empty")]
    NoEndpoints,

    /// The per-attempt dial timeout was zero.
    #[error("dial timeout must be greater than zero")]
    NonPositiveTimeout,

    /// An endpoint descriptor could not be turned into a connector.
    #[error("failed to parse endpoint #{index} ({endpoint}): {source}")]
    InvalidEndpoint {
        /// Position of the descriptor in the configured list.
        index: usize,
        /// Redacted descriptor.
        endpoint: String,
        #[source]
        source: DriverError,
    },
}
