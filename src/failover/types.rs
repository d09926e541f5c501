//! Failover outcome types.

use std::error::Error as StdError;

use thiserror::Error;

/// Why one host could not be used during a pass.
#[derive(Debug)]
pub struct HostFailure {
    /// Position of the host in the configured list.
    pub index: usize,
    /// Redacted endpoint descriptor.
    pub endpoint: String,
    /// Error reported by the host's connector.
    pub error: Box<dyn StdError + Send + Sync + 'static>,
}

impl HostFailure {
    pub fn new<E>(index: usize, endpoint: impl Into<String>, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            index,
            endpoint: endpoint.into(),
            error: Box::new(error),
        }
    }
}

impl std::fmt::Display for HostFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "host #{} ({}): {}", self.index, self.endpoint, self.error)
    }
}

/// Every host in one pass refused or timed out.
#[derive(Debug, Error)]
#[error("failed to connect to any of the {} hosts provided", .failures.len())]
pub struct ExhaustedHostsError {
    failures: Vec<HostFailure>,
}

impl ExhaustedHostsError {
    pub fn new(failures: Vec<HostFailure>) -> Self {
        Self { failures }
    }

    /// Per-host causes, in the order the hosts were tried.
    pub fn failures(&self) -> &[HostFailure] {
        &self.failures
    }

    /// Number of hosts tried.
    pub fn hosts_tried(&self) -> usize {
        self.failures.len()
    }

    /// Index of the hosts in the order they were tried.
    pub fn attempt_order(&self) -> Vec<usize> {
        self.failures.iter().map(|failure| failure.index).collect()
    }
}
