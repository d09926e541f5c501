//! Metrics collection.
//!
//! # Metrics
//! - `multihost_dial_attempts_total` (counter): dial attempts by host index
//! - `multihost_dial_failures_total` (counter): failed dials by host index
//! - `multihost_failovers_total` (counter): connections won on a host other
//!   than the one the pass started at
//! - `multihost_connect_exhausted_total` (counter): passes where every host failed
//! - `multihost_current_host` (gauge): rotation cursor after the last success
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the embedding application installs a recorder
//! - Without a recorder every call is a no-op

use metrics::{counter, gauge};

pub fn record_dial_attempt(host_index: usize) {
    counter!("multihost_dial_attempts_total", "host_index" => host_index.to_string()).increment(1);
}

pub fn record_dial_failure(host_index: usize) {
    counter!("multihost_dial_failures_total", "host_index" => host_index.to_string()).increment(1);
}

pub fn record_failover() {
    counter!("multihost_failovers_total").increment(1);
}

pub fn record_exhausted() {
    counter!("multihost_connect_exhausted_total").increment(1);
}

pub fn record_current_host(host_index: usize) {
    gauge!("multihost_current_host").set(host_index as f64);
}
