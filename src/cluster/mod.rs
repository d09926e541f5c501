//! Cluster membership subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint descriptors + dial timeout
//!     → host_set.rs (parse each descriptor into a connector, once)
//!     → HostConnectorSet (immutable host list + rotation cursor)
//!     → rotation.rs (visiting order for one pass, starting at the cursor)
//! ```
//!
//! # Design Decisions
//! - Construction is all-or-nothing; the first bad descriptor aborts it
//! - The cursor is the only shared mutable state and sits behind a mutex
//! - Descriptors are redacted (endpoint.rs) before they reach logs or errors

pub mod endpoint;
pub mod host_set;
pub mod rotation;
pub mod types;

pub use host_set::{Host, HostConnectorSet};
pub use rotation::RotationOrder;
pub use types::ConfigurationError;
