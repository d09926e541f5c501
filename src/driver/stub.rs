//! In-memory connector for deterministic failure injection.
//!
//! Every stub shares a [`StubJournal`] that records dials, statements,
//! transactions and closes in the order they happened, together with the
//! dial scope each attempt ran under. Behavior can be flipped at runtime to
//! simulate a host going down or coming back.

use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::driver::{Connection, Connector, DriverError, DriverInfo, DriverResult};
use crate::resilience::DialScope;

/// How a stub host answers a dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBehavior {
    /// Connect immediately.
    Accept,
    /// Fail immediately.
    Refuse,
    /// Never answer; the dial ends when its scope expires.
    Hang,
}

/// One recorded interaction with a stub host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubEvent {
    Dial(String),
    Prepare { host: String, query: String },
    Begin(String),
    Close(String),
}

#[derive(Debug, Default)]
struct JournalInner {
    events: Vec<StubEvent>,
    scopes: Vec<(String, DialScope)>,
}

/// Shared record of everything the stubs saw.
#[derive(Debug, Clone, Default)]
pub struct StubJournal {
    inner: Arc<Mutex<JournalInner>>,
}

impl StubJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: StubEvent) {
        self.inner.lock().events.push(event);
    }

    /// All events in order.
    pub fn events(&self) -> Vec<StubEvent> {
        self.inner.lock().events.clone()
    }

    /// Names of dialed hosts in dial order.
    pub fn dials(&self) -> Vec<String> {
        self.inner
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                StubEvent::Dial(host) => Some(host.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of closes recorded for `host`.
    pub fn closes(&self, host: &str) -> usize {
        self.inner
            .lock()
            .events
            .iter()
            .filter(|event| matches!(event, StubEvent::Close(h) if h == host))
            .count()
    }

    /// Dial scopes in dial order, paired with the host they were used for.
    pub fn scopes(&self) -> Vec<(String, DialScope)> {
        self.inner.lock().scopes.clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.events.clear();
        inner.scopes.clear();
    }
}

/// Test double standing in for a host-bound driver connector.
///
/// Clones share behavior, so a clone kept by a test can flip the behavior
/// of a connector already owned by a cluster.
#[derive(Debug, Clone)]
pub struct StubConnector {
    name: String,
    behavior: Arc<Mutex<StubBehavior>>,
    journal: StubJournal,
}

impl StubConnector {
    pub fn new(name: impl Into<String>, behavior: StubBehavior, journal: StubJournal) -> Self {
        Self {
            name: name.into(),
            behavior: Arc::new(Mutex::new(behavior)),
            journal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behavior(&self) -> StubBehavior {
        *self.behavior.lock()
    }

    pub fn set_behavior(&self, behavior: StubBehavior) {
        *self.behavior.lock() = behavior;
    }
}

/// Parses `accept:<name>`, `refuse:<name>` or `hang:<name>`.
impl FromStr for StubConnector {
    type Err = DriverError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let (kind, name) = descriptor
            .split_once(':')
            .ok_or_else(|| {
                DriverError::InvalidEndpoint(format!("missing behavior in '{descriptor}'"))
            })?;

        let behavior = match kind {
            "accept" => StubBehavior::Accept,
            "refuse" => StubBehavior::Refuse,
            "hang" => StubBehavior::Hang,
            other => {
                return Err(DriverError::InvalidEndpoint(format!(
                    "unknown stub behavior '{other}'"
                )))
            }
        };

        if name.is_empty() {
            return Err(DriverError::InvalidEndpoint("empty stub host name".to_string()));
        }

        Ok(Self::new(name, behavior, StubJournal::new()))
    }
}

impl Connector for StubConnector {
    type Connection = StubConnection;
    type Error = DriverError;

    async fn connect(&self, scope: &DialScope) -> DriverResult<StubConnection> {
        {
            let mut inner = self.journal.inner.lock();
            inner.events.push(StubEvent::Dial(self.name.clone()));
            inner.scopes.push((self.name.clone(), scope.clone()));
        }

        match self.behavior() {
            StubBehavior::Accept => Ok(StubConnection {
                host: self.name.clone(),
                journal: self.journal.clone(),
            }),
            StubBehavior::Refuse => Err(DriverError::Refused(self.name.clone())),
            StubBehavior::Hang => {
                scope.run(std::future::pending::<()>()).await?;
                Err(DriverError::Refused(self.name.clone()))
            }
        }
    }

    fn driver(&self) -> DriverInfo {
        DriverInfo::STUB
    }
}

/// Connection handed out by a [`StubConnector`].
#[derive(Debug)]
pub struct StubConnection {
    host: String,
    journal: StubJournal,
}

impl StubConnection {
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Statement prepared on a stub connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubStatement {
    pub host: String,
    pub query: String,
}

/// Transaction begun on a stub connection.
#[derive(Debug, PartialEq, Eq)]
pub struct StubTransaction<'c> {
    pub host: &'c str,
}

impl Connection for StubConnection {
    type Statement = StubStatement;
    type Transaction<'c>
        = StubTransaction<'c>
    where
        Self: 'c;

    async fn prepare(&mut self, query: &str) -> DriverResult<StubStatement> {
        self.journal.record(StubEvent::Prepare {
            host: self.host.clone(),
            query: query.to_string(),
        });
        Ok(StubStatement {
            host: self.host.clone(),
            query: query.to_string(),
        })
    }

    async fn begin(&mut self) -> DriverResult<StubTransaction<'_>> {
        self.journal.record(StubEvent::Begin(self.host.clone()));
        Ok(StubTransaction { host: &self.host })
    }

    async fn close(self) -> DriverResult<()> {
        self.journal.record(StubEvent::Close(self.host.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_descriptor() {
        let stub: StubConnector = "refuse:db-1".parse().unwrap();
        assert_eq!(stub.name(), "db-1");
        assert_eq!(stub.behavior(), StubBehavior::Refuse);

        assert!("db-1".parse::<StubConnector>().is_err());
        assert!("explode:db-1".parse::<StubConnector>().is_err());
        assert!("accept:".parse::<StubConnector>().is_err());
    }

    #[tokio::test]
    async fn test_behavior_flip_is_shared_between_clones() {
        let journal = StubJournal::new();
        let stub = StubConnector::new("db-1", StubBehavior::Accept, journal.clone());
        let remote = stub.clone();

        let scope = DialScope::background();
        assert!(stub.connect(&scope).await.is_ok());

        remote.set_behavior(StubBehavior::Refuse);
        assert!(matches!(stub.connect(&scope).await, Err(DriverError::Refused(_))));
        assert_eq!(journal.dials(), vec!["db-1", "db-1"]);
    }

    #[tokio::test]
    async fn test_hang_ends_at_scope_deadline() {
        let stub = StubConnector::new("db-1", StubBehavior::Hang, StubJournal::new());
        let (scope, _release) = DialScope::with_timeout(Duration::from_millis(20));
        let result = stub.connect(&scope).await;
        assert!(matches!(result, Err(DriverError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_connection_records_calls() {
        let journal = StubJournal::new();
        let stub = StubConnector::new("db-1", StubBehavior::Accept, journal.clone());
        let mut conn = stub.connect(&DialScope::background()).await.unwrap();

        conn.prepare("SELECT 1").await.unwrap();
        conn.begin().await.unwrap();
        conn.close().await.unwrap();

        assert_eq!(
            journal.events(),
            vec![
                StubEvent::Dial("db-1".into()),
                StubEvent::Prepare { host: "db-1".into(), query: "SELECT 1".into() },
                StubEvent::Begin("db-1".into()),
                StubEvent::Close("db-1".into()),
            ]
        );
    }
}
