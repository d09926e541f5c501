//! Dial timeout scopes.
//!
//! # Responsibilities
//! - Bound a single dial attempt with its own deadline
//! - Hand the attempt a cancellation signal it can observe
//! - Release the scope once the attempt fails, or once the connection
//!   it produced is closed
//!
//! # Design Decisions
//! - Uses Tokio's timer facilities and a `CancellationToken`
//! - Every attempt gets a fresh scope; a caller's deadline is never inherited
//! - Releasing consumes the handle, so a scope cannot be released twice
//! - Dropping an unreleased handle releases the scope

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline used when `now + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Why a scoped operation did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeExpired {
    /// The scope's deadline passed first.
    #[error("timed out after {0:?}")]
    DeadlineElapsed(Duration),

    /// The scope was released while the operation was in flight.
    #[error("scope released before completion")]
    Released,
}

/// Deadline and cancellation signal for one dial attempt.
///
/// Cloning a scope shares the signal: every clone observes the release.
#[derive(Debug, Clone)]
pub struct DialScope {
    /// Absolute deadline and the timeout it was derived from.
    bound: Option<(Instant, Duration)>,
    token: CancellationToken,
}

impl DialScope {
    /// Open a scope that expires `timeout` from now.
    ///
    /// Returns the scope and the handle that releases it.
    pub fn with_timeout(timeout: Duration) -> (Self, ScopeRelease) {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let token = CancellationToken::new();
        let scope = Self {
            bound: Some((deadline, timeout)),
            token: token.clone(),
        };
        (scope, ScopeRelease { token: Some(token) })
    }

    /// A scope with no deadline that is never released.
    pub fn background() -> Self {
        Self {
            bound: None,
            token: CancellationToken::new(),
        }
    }

    /// Absolute deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.bound.map(|(deadline, _)| deadline)
    }

    /// Timeout the deadline was derived from, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.bound.map(|(_, timeout)| timeout)
    }

    /// Whether the owning handle has released this scope.
    pub fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the deadline passes or the scope is
    /// released first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ScopeExpired>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return Err(ScopeExpired::Released);
        }

        match self.bound {
            Some((deadline, timeout)) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(ScopeExpired::Released),
                    result = tokio::time::timeout_at(deadline, fut) => {
                        result.map_err(|_| ScopeExpired::DeadlineElapsed(timeout))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(ScopeExpired::Released),
                    output = fut => Ok(output),
                }
            }
        }
    }
}

/// Handle that releases a [`DialScope`].
#[derive(Debug)]
#[must_use = "dropping a ScopeRelease releases its scope immediately"]
pub struct ScopeRelease {
    token: Option<CancellationToken>,
}

impl ScopeRelease {
    /// Release the scope.
    pub fn release(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl Drop for ScopeRelease {
    fn drop(&mut self) {
        self.fire();
    }
}
