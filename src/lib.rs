//! Multi-host MySQL connector with transparent failover.
//!
//! Callers ask for a connection once; the connector picks a host from an
//! ordered cluster, fails over across the rest on error, and returns a
//! connection that behaves like a direct single-host one.
//!
//! # Architecture Overview
//!
//! ```text
//!     Caller
//!       │ connect()
//!       ▼
//!  ┌──────────────────┐   snapshot / advance   ┌───────────────────┐
//!  │ FailoverConnector│◀──────────────────────▶│ HostConnectorSet  │
//!  │   (failover)     │                        │ hosts + cursor    │
//!  └────────┬─────────┘                        │   (cluster)       │
//!           │ one DialScope per attempt        └───────────────────┘
//!           ▼
//!  ┌──────────────────┐        ┌──────────────────────────────┐
//!  │ driver Connector │───────▶│ ManagedConnection            │
//!  │  (mysql / stub)  │        │ raw connection + ScopeRelease│
//!  └──────────────────┘        └──────────────────────────────┘
//! ```

// Core subsystems
pub mod cluster;
pub mod driver;
pub mod failover;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod resilience;

pub use cluster::{ConfigurationError, HostConnectorSet};
pub use config::ClusterConfig;
pub use driver::{Connection, Connector, DriverError, DriverInfo};
pub use failover::{
    ExhaustedHostsError, FailoverConnector, ManagedConnection, MySqlFailoverConnector,
};
pub use resilience::{DialScope, ScopeRelease};
