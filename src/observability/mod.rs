//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Failover connector produces:
//!     → tracing events (dial attempts, failures, failovers, exhaustion)
//!     → metrics.rs (counters, cursor gauge)
//!
//! Binaries install:
//!     → logging.rs (tracing subscriber with env filter)
//! ```
//!
//! # Design Decisions
//! - Structured fields: host_index, endpoint, error
//! - Endpoints are always redacted before they are logged
//! - The library never installs a subscriber or recorder on its own

pub mod logging;
pub mod metrics;
