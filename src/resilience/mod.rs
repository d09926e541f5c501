//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Dial attempt against one host:
//!     → timeouts.rs (open a fresh DialScope with the per-attempt timeout)
//!     → driver dials inside the scope
//!     → On failure: scope released immediately
//!     → On success: release handle travels with the connection until close
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every dial has a deadline
//! - Deadlines are per attempt, never shared across hosts

pub mod timeouts;

pub use timeouts::{DialScope, ScopeExpired, ScopeRelease};
