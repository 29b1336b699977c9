//! Retry engine
//!
//! Executes one remote operation with bounded-duration retry, exponential
//! backoff and per-attempt jitter. All failure classification lives here:
//! reconcilers never inspect status codes themselves, they only decide when
//! to invoke the engine and what to do with its terminal outcome.
//!
//! ## Backoff
//!
//! The wait starts at a 2-second seed and doubles after every retryable
//! failure. Each sleep adds a jitter contribution sampled uniformly from
//! 0..=1000 ms, re-sampled on every attempt so that concurrent
//! reconciliations retrying against the same endpoint decorrelate instead
//! of forming a synchronized retry storm.
//!
//! ## Terminal outcomes
//!
//! - success, with the operation's result
//! - a non-retryable error, propagated verbatim so callers can inspect the
//!   underlying remote failure
//! - [`Error::DeadlineExceeded`] once the duration ceiling elapses, carrying
//!   the last retryable error for diagnostics. The loop may overshoot the
//!   ceiling by at most one in-flight sleep.

use crate::error::{Error, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Initial backoff wait before the first doubling
pub const SEED_WAIT: Duration = Duration::from_secs(2);

/// Upper bound of the per-attempt jitter contribution (milliseconds)
pub const MAX_JITTER_MS: u64 = 1000;

/// Default retry ceiling (total duration across all attempts)
pub const DEFAULT_CEILING: Duration = Duration::from_secs(60 * 60);

/// Classification of a remote failure, evaluated in precedence order
/// (first match wins). Everything except [`RetryClass::Permanent`] is
/// retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// 500/502/503: the remote service is transiently overloaded or down
    TransientServer,
    /// 409/429: contention or rate limiting
    Contention,
    /// Malformed "bad request" whose payload carries a 400-class application
    /// code. Known backend quirk: transient conditions occasionally
    /// mis-reported as client errors. Workaround, not a guarantee; do not
    /// generalize to other 400-class errors.
    KnownQuirk,
    /// Free-text "service unavailable" marker from the API
    ServiceUnavailable,
    /// Free-text eventual-consistency marker: the remote store has not yet
    /// converged
    EventualConsistency,
    /// Everything else (validation, not-found, auth): surfaced immediately
    Permanent,
}

impl RetryClass {
    /// Whether a failure of this class should be retried
    pub fn is_retryable(self) -> bool {
        !matches!(self, RetryClass::Permanent)
    }
}

/// Classify a remote failure from its optional HTTP status code and its
/// message text.
///
/// Pure and separately testable; the driving loop in [`RetryPolicy::run`]
/// is its only non-test caller.
pub fn classify(status: Option<u16>, message: &str) -> RetryClass {
    match status {
        Some(500) | Some(502) | Some(503) => return RetryClass::TransientServer,
        Some(409) | Some(429) => return RetryClass::Contention,
        _ => {}
    }

    // Deal with the broken API: both markers must be present
    if message.contains("Invalid Input: Bad request for \"") && message.contains("\"code\":400") {
        return RetryClass::KnownQuirk;
    }
    if message.contains("Service unavailable. Please try again") {
        return RetryClass::ServiceUnavailable;
    }
    if message.contains("Eventual consistency. Please try again") {
        return RetryClass::EventualConsistency;
    }

    RetryClass::Permanent
}

/// Retry policy: the knobs governing one retry session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total duration ceiling across all attempts
    pub ceiling: Duration,
    /// Initial backoff wait (doubles after each retryable failure)
    pub seed_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            seed_wait: SEED_WAIT,
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails non-retryably, or the ceiling
    /// elapses.
    ///
    /// `op` is invoked once per attempt and must perform exactly one remote
    /// call; implementations behind the API traits are forbidden from
    /// retrying internally.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut session = RetrySession::new(*self);

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let class = classify(err.status_code(), &err.to_string());
            if !class.is_retryable() {
                return Err(err);
            }

            if session.deadline_passed() {
                return Err(Error::DeadlineExceeded {
                    ceiling: self.ceiling,
                    last: Box::new(err),
                });
            }

            let pause = session.next_backoff();
            debug!(error = %err, class = ?class, sleep_ms = pause.as_millis() as u64, "retrying remote call");
            tokio::time::sleep(pause).await;
        }
    }
}

/// Ephemeral state for one in-flight retried operation: the current wait
/// interval and the wall-clock deadline. Created when a reconciliation
/// action begins, destroyed when it terminates.
#[derive(Debug)]
pub struct RetrySession {
    wait: Duration,
    deadline: Instant,
}

impl RetrySession {
    /// Start a session clocked from now
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            wait: policy.seed_wait,
            deadline: Instant::now() + policy.ceiling,
        }
    }

    /// Whether the session's deadline has passed
    pub fn deadline_passed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Compute the next sleep (base wait plus fresh jitter) and double the
    /// base for the following attempt
    pub fn next_backoff(&mut self) -> Duration {
        let jitter = Duration::from_millis(rand::rng().random_range(0..=MAX_JITTER_MS));
        self.backoff_with_jitter(jitter)
    }

    fn backoff_with_jitter(&mut self, jitter: Duration) -> Duration {
        let pause = self.wait + jitter;
        self.wait *= 2;
        pause
    }
}
