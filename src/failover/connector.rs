//! Round-robin connector with failover.
//!
//! # Algorithm
//! ```text
//! start = cursor
//! for index in (start, start+1, …) mod N:
//!     open a fresh DialScope(dial_timeout)
//!     dial host[index] inside it
//!         failure → release scope, log, remember cause, next host
//!         success → cursor = index, return ManagedConnection(conn, release)
//! every host failed → ExhaustedHostsError
//! ```
//!
//! # Design Decisions
//! - Sticky start: the pass begins at the host that last accepted, so a
//!   known-bad host is not dialed first after a failover
//! - Each attempt gets its own timeout; a slow host never eats into the
//!   next host's budget, and the caller's deadline is not propagated
//! - The cursor lock is held only for the read and for the write, never
//!   across dials; concurrent callers may start at the same host
//! - One pass only; retrying the whole call is up to the caller

use std::str::FromStr;

use crate::cluster::{ConfigurationError, HostConnectorSet, RotationOrder};
use crate::config::ClusterConfig;
use crate::driver::{Connector, DriverError, DriverInfo, MySqlHostConnector};
use crate::failover::connection::ManagedConnection;
use crate::failover::types::{ExhaustedHostsError, HostFailure};
use crate::observability::metrics;
use crate::resilience::DialScope;

/// Failover connector over MySQL hosts.
pub type MySqlFailoverConnector = FailoverConnector<MySqlHostConnector>;

/// Connector that fails over across an ordered set of hosts.
#[derive(Debug)]
pub struct FailoverConnector<C> {
    hosts: HostConnectorSet<C>,
}

impl<C> FailoverConnector<C>
where
    C: Connector + FromStr<Err = DriverError>,
{
    /// Build a connector from endpoint descriptors.
    pub fn from_endpoints<I, S>(
        endpoints: I,
        dial_timeout: std::time::Duration,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(HostConnectorSet::new(endpoints, dial_timeout)?))
    }

    /// Build a connector from cluster configuration.
    pub fn from_config(config: &ClusterConfig) -> Result<Self, ConfigurationError> {
        Self::from_endpoints(&config.endpoints, config.dial_timeout())
    }
}

impl<C: Connector> FailoverConnector<C> {
    pub fn new(hosts: HostConnectorSet<C>) -> Self {
        tracing::info!(
            hosts = hosts.len(),
            dial_timeout = ?hosts.dial_timeout(),
            "Failover connector ready"
        );
        Self { hosts }
    }

    pub fn hosts(&self) -> &HostConnectorSet<C> {
        &self.hosts
    }

    /// Driver of the cluster's hosts.
    pub fn driver(&self) -> DriverInfo {
        self.hosts.host(0).connector().driver()
    }

    /// Connect to the first host that accepts, starting from the last
    /// host that did.
    pub async fn connect(&self) -> Result<ManagedConnection<C::Connection>, ExhaustedHostsError> {
        self.failover_connect().await
    }

    async fn failover_connect(
        &self,
    ) -> Result<ManagedConnection<C::Connection>, ExhaustedHostsError> {
        let start = self.hosts.snapshot_cursor();
        let mut failures = Vec::with_capacity(self.hosts.len());

        for index in RotationOrder::new(start, self.hosts.len()) {
            let host = self.hosts.host(index);
            let (scope, release) = DialScope::with_timeout(self.hosts.dial_timeout());

            metrics::record_dial_attempt(index);
            tracing::debug!(host_index = index, endpoint = %host.endpoint(), "Dialing host");

            match host.connector().connect(&scope).await {
                Ok(conn) => {
                    self.hosts.advance_cursor_to(index);
                    metrics::record_current_host(index);

                    if index != start {
                        metrics::record_failover();
                        tracing::info!(
                            from = start,
                            to = index,
                            endpoint = %host.endpoint(),
                            "Failed over to host"
                        );
                    }

                    return Ok(ManagedConnection::new(conn, release, index, host.endpoint()));
                }
                Err(e) => {
                    release.release();
                    metrics::record_dial_failure(index);
                    tracing::warn!(
                        host_index = index,
                        endpoint = %host.endpoint(),
                        error = %e,
                        "Error connecting to host"
                    );
                    failures.push(HostFailure::new(index, host.endpoint(), e));
                }
            }
        }

        metrics::record_exhausted();
        tracing::error!(
            hosts = self.hosts.len(),
            "Failed to connect to any of the hosts provided"
        );
        Err(ExhaustedHostsError::new(failures))
    }
}

/// The caller's scope is ignored; every host attempt runs under its own.
impl<C: Connector> Connector for FailoverConnector<C> {
    type Connection = ManagedConnection<C::Connection>;
    type Error = ExhaustedHostsError;

    async fn connect(&self, _scope: &DialScope) -> Result<Self::Connection, ExhaustedHostsError> {
        self.failover_connect().await
    }

    fn driver(&self) -> DriverInfo {
        FailoverConnector::driver(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Connection, StubBehavior, StubConnector, StubJournal};
    use std::sync::Arc;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_millis(3000);

    fn cluster(
        behaviors: &[StubBehavior],
        journal: &StubJournal,
    ) -> FailoverConnector<StubConnector> {
        let hosts = behaviors.iter().enumerate().map(|(i, behavior)| {
            let name = format!("host{}", i + 1);
            (name.clone(), StubConnector::new(name, *behavior, journal.clone()))
        });
        FailoverConnector::new(HostConnectorSet::from_connectors(hosts, TIMEOUT).unwrap())
    }

    #[tokio::test]
    async fn test_first_host_connects() {
        let journal = StubJournal::new();
        let connector = cluster(&[StubBehavior::Accept, StubBehavior::Accept], &journal);

        let conn = connector.connect().await.unwrap();
        assert_eq!(conn.host_index(), 0);
        assert_eq!(journal.dials(), vec!["host1"]);
    }

    #[tokio::test]
    async fn test_continues_to_next_host_on_failure() {
        let journal = StubJournal::new();
        let connector = cluster(&[StubBehavior::Refuse, StubBehavior::Accept], &journal);

        let conn = connector.connect().await.unwrap();
        assert_eq!(conn.host_index(), 1);
        assert_eq!(connector.hosts().snapshot_cursor(), 1);
        assert_eq!(journal.dials(), vec!["host1", "host2"]);
    }

    #[tokio::test]
    async fn test_all_hosts_fail() {
        let journal = StubJournal::new();
        let connector = cluster(&[StubBehavior::Refuse, StubBehavior::Refuse], &journal);
        connector.hosts().advance_cursor_to(1);

        let err = connector.connect().await.unwrap_err();
        assert_eq!(err.hosts_tried(), 2);
        assert_eq!(err.attempt_order(), vec![1, 0]);
        assert_eq!(connector.hosts().snapshot_cursor(), 1);
    }

    #[tokio::test]
    async fn test_only_live_host_wins_from_any_start() {
        for start in 0..4 {
            let journal = StubJournal::new();
            let connector = cluster(
                &[
                    StubBehavior::Refuse,
                    StubBehavior::Refuse,
                    StubBehavior::Accept,
                    StubBehavior::Refuse,
                ],
                &journal,
            );
            connector.hosts().advance_cursor_to(start);

            let conn = connector.connect().await.unwrap();
            assert_eq!(conn.host_index(), 2);
            assert_eq!(connector.hosts().snapshot_cursor(), 2);

            let expected: Vec<String> = RotationOrder::new(start, 4)
                .take_while(|&i| i != 2)
                .chain(std::iter::once(2))
                .map(|i| format!("host{}", i + 1))
                .collect();
            assert_eq!(journal.dials(), expected);
        }
    }

    #[tokio::test]
    async fn test_sticky_preference_after_failover() {
        let journal = StubJournal::new();
        let connector = cluster(
            &[StubBehavior::Refuse, StubBehavior::Accept, StubBehavior::Accept],
            &journal,
        );

        connector.connect().await.unwrap();
        journal.clear();

        connector.connect().await.unwrap();
        assert_eq!(journal.dials(), vec!["host2"]);
    }

    #[tokio::test]
    async fn test_failed_attempt_scope_released_winner_scope_held() {
        let journal = StubJournal::new();
        let connector = cluster(&[StubBehavior::Refuse, StubBehavior::Accept], &journal);

        let conn = connector.connect().await.unwrap();
        let scopes = journal.scopes();
        assert_eq!(scopes.len(), 2);
        assert!(scopes[0].1.is_released());
        assert!(!scopes[1].1.is_released());

        conn.close().await.unwrap();
        assert!(scopes[1].1.is_released());
        assert_eq!(journal.closes("host2"), 1);
    }

    #[tokio::test]
    async fn test_each_attempt_gets_a_fresh_timeout() {
        let journal = StubJournal::new();
        let hosts = vec![
            ("host1", StubConnector::new("host1", StubBehavior::Hang, journal.clone())),
            ("host2", StubConnector::new("host2", StubBehavior::Hang, journal.clone())),
            ("host3", StubConnector::new("host3", StubBehavior::Accept, journal.clone())),
        ];
        let timeout = Duration::from_millis(30);
        let connector =
            FailoverConnector::new(HostConnectorSet::from_connectors(hosts, timeout).unwrap());

        let conn = connector.connect().await.unwrap();
        assert_eq!(conn.host_index(), 2);

        for (_, scope) in journal.scopes() {
            assert_eq!(scope.timeout(), Some(timeout));
        }
    }

    #[tokio::test]
    async fn test_max_dial_timeout_connects() {
        let journal = StubJournal::new();
        let hosts = vec![
            ("host1", StubConnector::new("host1", StubBehavior::Refuse, journal.clone())),
            ("host2", StubConnector::new("host2", StubBehavior::Accept, journal.clone())),
        ];
        let timeout = Duration::from_millis(u64::MAX);
        let connector =
            FailoverConnector::new(HostConnectorSet::from_connectors(hosts, timeout).unwrap());

        let conn = connector.connect().await.unwrap();
        assert_eq!(conn.host_index(), 1);
        assert_eq!(journal.scopes()[1].1.timeout(), Some(timeout));
    }

    #[tokio::test]
    async fn test_connector_trait_ignores_caller_scope() {
        let journal = StubJournal::new();
        let connector = cluster(&[StubBehavior::Refuse, StubBehavior::Accept], &journal);

        let (caller_scope, caller_release) = DialScope::with_timeout(Duration::from_secs(5));
        caller_release.release();

        let conn = Connector::connect(&connector, &caller_scope).await.unwrap();
        assert_eq!(conn.host_index(), 1);
        assert_eq!(Connector::driver(&connector), DriverInfo::STUB);
    }

    #[tokio::test]
    async fn test_concurrent_callers_keep_cursor_valid() {
        let journal = StubJournal::new();
        let connector = Arc::new(cluster(
            &[StubBehavior::Refuse, StubBehavior::Accept, StubBehavior::Accept],
            &journal,
        ));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let connector = connector.clone();
            handles.push(tokio::spawn(async move {
                let conn = connector.connect().await.unwrap();
                let index = conn.host_index();
                conn.close().await.unwrap();
                index
            }));
        }

        for handle in handles {
            let index = handle.await.unwrap();
            assert!(index == 1 || index == 2);
        }
        assert!(connector.hosts().snapshot_cursor() < 3);
    }
}
