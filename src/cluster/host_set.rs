//! Host connector set.
//!
//! # Responsibilities
//! - Build one connector per endpoint descriptor, once, at startup
//! - Hold the per-attempt dial timeout
//! - Track the rotation cursor (the host that last accepted a connection)
//!
//! The connector list never changes after construction and is read without
//! locking. The cursor is the only mutable state; each read and each write
//! takes the lock on its own.

use std::str::FromStr;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cluster::endpoint::redact;
use crate::cluster::types::ConfigurationError;
use crate::driver::DriverError;

/// One cluster member: its connector and how it appears in logs.
#[derive(Debug)]
pub struct Host<C> {
    /// Redacted endpoint descriptor.
    endpoint: String,
    connector: C,
}

impl<C> Host<C> {
    fn new(descriptor: &str, connector: C) -> Self {
        Self {
            endpoint: redact(descriptor),
            connector,
        }
    }

    /// Redacted endpoint descriptor.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }
}

/// Ordered, fixed set of host connectors plus the rotation cursor.
#[derive(Debug)]
pub struct HostConnectorSet<C> {
    hosts: Vec<Host<C>>,
    dial_timeout: Duration,
    /// Index of the host that last accepted a connection. Always `< hosts.len()`.
    current_index: Mutex<usize>,
}

impl<C> HostConnectorSet<C> {
    /// Parse every descriptor into a connector.
    ///
    /// Stops at the first descriptor that fails to parse.
    pub fn new<I, S>(endpoints: I, dial_timeout: Duration) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: FromStr<Err = DriverError>,
    {
        let endpoints: Vec<S> = endpoints.into_iter().collect();
        Self::check(endpoints.len(), dial_timeout)?;

        let mut hosts = Vec::with_capacity(endpoints.len());
        for (index, descriptor) in endpoints.iter().enumerate() {
            let descriptor = descriptor.as_ref();
            let connector = descriptor.parse::<C>().map_err(|source| {
                ConfigurationError::InvalidEndpoint {
                    index,
                    endpoint: redact(descriptor),
                    source,
                }
            })?;
            hosts.push(Host::new(descriptor, connector));
        }

        Ok(Self::assemble(hosts, dial_timeout))
    }

    /// Build a set from connectors that already exist.
    pub fn from_connectors<I, S>(
        connectors: I,
        dial_timeout: Duration,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
    {
        let hosts: Vec<Host<C>> = connectors
            .into_iter()
            .map(|(descriptor, connector)| Host::new(descriptor.as_ref(), connector))
            .collect();
        Self::check(hosts.len(), dial_timeout)?;

        Ok(Self::assemble(hosts, dial_timeout))
    }

    fn check(len: usize, dial_timeout: Duration) -> Result<(), ConfigurationError> {
        if len == 0 {
            return Err(ConfigurationError::NoEndpoints);
        }
        if dial_timeout.is_zero() {
            return Err(ConfigurationError::NonPositiveTimeout);
        }
        Ok(())
    }

    fn assemble(hosts: Vec<Host<C>>, dial_timeout: Duration) -> Self {
        Self {
            hosts,
            dial_timeout,
            current_index: Mutex::new(0),
        }
    }

    /// Number of hosts. Never zero.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Always false; construction rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Per-attempt dial timeout.
    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    pub fn get(&self, index: usize) -> Option<&Host<C>> {
        self.hosts.get(index)
    }

    pub fn connector_at(&self, index: usize) -> Option<&C> {
        self.get(index).map(Host::connector)
    }

    /// Redacted descriptor of the host at `index`.
    pub fn endpoint_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(Host::endpoint)
    }

    /// Current cursor value.
    pub fn snapshot_cursor(&self) -> usize {
        *self.current_index.lock()
    }

    /// Move the cursor to `index`.
    ///
    /// Out-of-range indexes wrap so the cursor stays valid.
    pub fn advance_cursor_to(&self, index: usize) {
        debug_assert!(index < self.hosts.len(), "cursor index {index} out of range");
        *self.current_index.lock() = index % self.hosts.len();
    }

    pub(crate) fn host(&self, index: usize) -> &Host<C> {
        &self.hosts[index]
    }
}
