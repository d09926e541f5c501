//! Driver-level types and error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::resilience::ScopeExpired;

/// Identifies the database driver behind a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverInfo {
    /// Short driver name, e.g. `mysql`.
    pub name: &'static str,
}

impl DriverInfo {
    pub const MYSQL: Self = Self { name: "mysql" };
    pub const STUB: Self = Self { name: "stub" };
}

impl std::fmt::Display for DriverInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Errors raised by a single host's connector or connection.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The endpoint descriptor could not be turned into a connector.
    #[error("invalid endpoint descriptor: {0}")]
    InvalidEndpoint(String),

    /// The dial did not finish before the attempt's deadline.
    #[error("dial timed out after {0:?}")]
    Timeout(Duration),

    /// The attempt's scope was released while dialing.
    #[error("dial cancelled")]
    Cancelled,

    /// The host refused the connection.
    #[error("connection refused by {0}")]
    Refused(String),

    /// Error reported by the underlying database driver.
    #[error("database driver error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ScopeExpired> for DriverError {
    fn from(err: ScopeExpired) -> Self {
        match err {
            ScopeExpired::DeadlineElapsed(timeout) => DriverError::Timeout(timeout),
            ScopeExpired::Released => DriverError::Cancelled,
        }
    }
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_expiry_conversion() {
        let err = DriverError::from(ScopeExpired::DeadlineElapsed(Duration::from_millis(250)));
        assert!(matches!(err, DriverError::Timeout(d) if d == Duration::from_millis(250)));

        let err = DriverError::from(ScopeExpired::Released);
        assert!(matches!(err, DriverError::Cancelled));
    }

    #[test]
    fn test_error_display() {
        let err = DriverError::Refused("db-2".to_string());
        assert_eq!(err.to_string(), "connection refused by db-2");

        let err = DriverError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "dial timed out after 3s");
    }

    #[test]
    fn test_driver_info_display() {
        assert_eq!(DriverInfo::MYSQL.to_string(), "mysql");
    }
}
