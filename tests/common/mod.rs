//! Shared utilities for integration testing.

use std::time::Duration;

use mysql_multihost::driver::{StubBehavior, StubConnector, StubJournal};
use mysql_multihost::{FailoverConnector, HostConnectorSet};

pub const DIAL_TIMEOUT: Duration = Duration::from_millis(3000);

/// A stub cluster: the connector plus handles to flip each host.
pub struct StubCluster {
    pub connector: FailoverConnector<StubConnector>,
    pub hosts: Vec<StubConnector>,
    pub journal: StubJournal,
}

/// Build a cluster whose hosts are named `host1`, `host2`, ...
pub fn stub_cluster(behaviors: &[StubBehavior]) -> StubCluster {
    stub_cluster_with_timeout(behaviors, DIAL_TIMEOUT)
}

pub fn stub_cluster_with_timeout(behaviors: &[StubBehavior], timeout: Duration) -> StubCluster {
    let journal = StubJournal::new();
    let hosts: Vec<StubConnector> = behaviors
        .iter()
        .enumerate()
        .map(|(i, behavior)| {
            StubConnector::new(format!("host{}", i + 1), *behavior, journal.clone())
        })
        .collect();

    let set = HostConnectorSet::from_connectors(
        hosts.iter().map(|h| (format!("stub://{}", h.name()), h.clone())),
        timeout,
    )
    .unwrap();

    StubCluster {
        connector: FailoverConnector::new(set),
        hosts,
        journal,
    }
}
