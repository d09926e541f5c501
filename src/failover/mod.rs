//! Failover subsystem.
//!
//! # Data Flow
//! ```text
//! Caller
//!     → connector.rs (FailoverConnector::connect, one pass over the hosts)
//!     → driver Connector::connect per host, each under its own DialScope
//!     → connection.rs (ManagedConnection: raw connection + scope release)
//!     → Caller uses it like a direct connection, then closes it
//! ```
//!
//! # Design Decisions
//! - Per-host dial errors are recovered locally and collected
//! - The caller sees either a connection or one ExhaustedHostsError

pub mod connection;
pub mod connector;
pub mod types;

pub use connection::ManagedConnection;
pub use connector::{FailoverConnector, MySqlFailoverConnector};
pub use types::{ExhaustedHostsError, HostFailure};
