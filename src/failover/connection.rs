//! Connection handed out by the failover connector.
//!
//! # Responsibilities
//! - Forward prepare / begin to the raw driver connection unchanged
//! - Carry the release handle of the dial scope that produced it
//! - On close: release the scope, then close the raw connection
//!
//! # Design Decisions
//! - `close` consumes the connection, so it runs at most once
//! - Dropping without closing still releases the scope

use crate::driver::{Connection, DriverResult};
use crate::resilience::ScopeRelease;

/// A raw connection bound to the dial scope it was established in.
#[derive(Debug)]
pub struct ManagedConnection<T> {
    raw: T,
    release: ScopeRelease,
    host_index: usize,
    endpoint: String,
}

impl<T> ManagedConnection<T> {
    pub fn new(
        raw: T,
        release: ScopeRelease,
        host_index: usize,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            raw,
            release,
            host_index,
            endpoint: endpoint.into(),
        }
    }

    /// Index of the host this connection is bound to.
    pub fn host_index(&self) -> usize {
        self.host_index
    }

    /// Redacted endpoint of the host this connection is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut T {
        &mut self.raw
    }
}

impl<T: Connection> Connection for ManagedConnection<T> {
    type Statement = T::Statement;
    type Transaction<'c>
        = T::Transaction<'c>
    where
        Self: 'c;

    async fn prepare(&mut self, query: &str) -> DriverResult<T::Statement> {
        self.raw.prepare(query).await
    }

    async fn begin(&mut self) -> DriverResult<T::Transaction<'_>> {
        self.raw.begin().await
    }

    async fn close(self) -> DriverResult<()> {
        let Self {
            raw,
            release,
            host_index,
            ..
        } = self;
        release.release();
        tracing::debug!(host_index, "Closing connection");
        raw.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{
        Connector, StubBehavior, StubConnection, StubConnector, StubEvent, StubJournal,
        StubStatement,
    };
    use crate::resilience::DialScope;
    use std::time::Duration;

    async fn managed(journal: &StubJournal) -> (ManagedConnection<StubConnection>, DialScope) {
        let stub = StubConnector::new("db-1", StubBehavior::Accept, journal.clone());
        let (scope, release) = DialScope::with_timeout(Duration::from_secs(5));
        let raw = stub.connect(&scope).await.unwrap();
        (ManagedConnection::new(raw, release, 0, "stub://db-1"), scope)
    }

    #[tokio::test]
    async fn test_prepare_and_begin_pass_through() {
        let journal = StubJournal::new();
        let (mut conn, _scope) = managed(&journal).await;

        let statement = conn.prepare("SELECT 1").await.unwrap();
        assert_eq!(
            statement,
            StubStatement {
                host: "db-1".into(),
                query: "SELECT 1".into()
            }
        );

        let tx = conn.begin().await.unwrap();
        assert_eq!(tx.host, "db-1");

        assert_eq!(conn.raw().host(), "db-1");
        assert_eq!(conn.host_index(), 0);
        assert_eq!(conn.endpoint(), "stub://db-1");
    }

    #[tokio::test]
    async fn test_close_releases_scope_and_closes_raw() {
        let journal = StubJournal::new();
        let (conn, scope) = managed(&journal).await;

        assert!(!scope.is_released());
        conn.close().await.unwrap();

        assert!(scope.is_released());
        assert_eq!(journal.closes("db-1"), 1);
        assert_eq!(journal.events().last(), Some(&StubEvent::Close("db-1".into())));
    }

    #[tokio::test]
    async fn test_drop_releases_scope_without_closing() {
        let journal = StubJournal::new();
        let (conn, scope) = managed(&journal).await;

        drop(conn);

        assert!(scope.is_released());
        assert_eq!(journal.closes("db-1"), 0);
    }
}
