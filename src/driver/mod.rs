//! Database driver seam.
//!
//! # Data Flow
//! ```text
//! Endpoint descriptor (string)
//!     → FromStr on a concrete connector (mysql.rs, stub.rs)
//!     → Connector::connect(scope) dials within the scope's deadline
//!     → Connection (prepare / begin / close) handed to the caller
//! ```
//!
//! # Design Decisions
//! - Two traits mirror a generic SQL connector: `Connector` and `Connection`
//! - Everything behind them (URL syntax, wire protocol, auth, statements,
//!   transactions) belongs to the driver
//! - The failover layer implements `Connector` itself, so it nests anywhere a
//!   single-host connector fits

pub mod mysql;
pub mod stub;
pub mod types;

use std::future::Future;

use crate::resilience::DialScope;

pub use mysql::{MySqlHostConnection, MySqlHostConnector};
pub use stub::{
    StubBehavior, StubConnection, StubConnector, StubEvent, StubJournal, StubStatement,
    StubTransaction,
};
pub use types::{DriverError, DriverInfo, DriverResult};

/// A capability able to establish connections to one logical target.
pub trait Connector: Send + Sync {
    /// Connection type produced on success.
    type Connection: Connection;
    /// Error produced when no connection could be established.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Attempt to establish a connection within `scope`.
    fn connect(
        &self,
        scope: &DialScope,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;

    /// The driver behind this connector.
    fn driver(&self) -> DriverInfo;
}

/// An established database connection.
pub trait Connection: Send {
    /// Prepared statement handle.
    type Statement: Send;
    /// Open transaction, borrowing the connection.
    type Transaction<'c>: Send
    where
        Self: 'c;

    /// Prepare a statement.
    fn prepare(&mut self, query: &str)
        -> impl Future<Output = DriverResult<Self::Statement>> + Send;

    /// Begin a transaction.
    fn begin(&mut self) -> impl Future<Output = DriverResult<Self::Transaction<'_>>> + Send;

    /// Close the connection.
    fn close(self) -> impl Future<Output = DriverResult<()>> + Send
    where
        Self: Sized;
}
