//! Timer-based test utilities.
//!
//! - [`sleep`] - Suspend for a duration
//! - [`wait_for`] / [`try_wait_for`] - Poll a condition until it holds or a window expires
//! - [`with_timeout`] - Race an operation against a timer
//! - [`spawn_with_timeout`] - Same, leaving the operation running if it loses
//!
//! All waiting goes through `tokio::time`, so tests may run with paused time
//! (`#[tokio::test(start_paused = true)]`) and still observe the same order
//! of events.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use testkit_support::timing::{wait_for, with_timeout, WaitOptions};
//!
//! # async fn demo() -> testkit_support::Result<()> {
//! wait_for(|| async { true }, WaitOptions::default()).await?;
//!
//! let value = with_timeout(Duration::from_secs(1), || async { 42 }).await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

/// Message used by [`with_timeout`] when the timer wins.
pub const DEFAULT_TIMEOUT_MESSAGE: &str = "Operation timed out";

/// Suspend the current task for `duration`.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

/// Polling window for [`wait_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total time to keep checking.
    pub timeout: Duration,
    /// Pause between checks.
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            interval: Duration::from_millis(100),
        }
    }
}

impl WaitOptions {
    /// Create the default window (5s timeout, 100ms interval).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between checks.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Wait until `condition` resolves to `true`.
///
/// The condition is checked immediately, then again after every
/// `options.interval` until `options.timeout` has elapsed.
///
/// # Errors
///
/// Returns [`Error::ConditionTimeout`] if the condition never held.
pub async fn wait_for<F, Fut>(mut condition: F, options: WaitOptions) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    try_wait_for(
        move || {
            let check = condition();
            async move { Ok::<_, Error>(check.await) }
        },
        options,
    )
    .await
}

/// Wait until a fallible `condition` resolves to `Ok(true)`.
///
/// An `Err` from the condition is returned at once; it is not retried.
///
/// # Errors
///
/// Returns the condition's error, or [`Error::ConditionTimeout`] converted
/// into `E` if the condition never held.
pub async fn try_wait_for<F, Fut, E>(
    mut condition: F,
    options: WaitOptions,
) -> std::result::Result<(), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<bool, E>>,
    E: From<Error>,
{
    let start = Instant::now();

    while start.elapsed() < options.timeout {
        if condition().await? {
            return Ok(());
        }
        tokio::time::sleep(options.interval).await;
    }

    debug!(timeout_ms = options.timeout.as_millis(), "condition not met");
    Err(Error::ConditionTimeout(options.timeout).into())
}

/// Run `operation`, failing with [`DEFAULT_TIMEOUT_MESSAGE`] if it takes
/// longer than `timeout`.
///
/// The operation's future is dropped when the timer wins, which cancels it at
/// its current suspension point. Use [`spawn_with_timeout`] to let it keep
/// running instead.
///
/// # Errors
///
/// Returns [`Error::Timeout`] if the timer fires first.
pub async fn with_timeout<F, Fut, T>(timeout: Duration, operation: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    with_timeout_message(timeout, DEFAULT_TIMEOUT_MESSAGE, operation).await
}

/// [`with_timeout`] with a custom failure message.
///
/// # Errors
///
/// Returns [`Error::Timeout`] carrying `message` if the timer fires first.
pub async fn with_timeout_message<F, Fut, T>(
    timeout: Duration,
    message: &str,
    operation: F,
) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    tokio::time::timeout(timeout, operation())
        .await
        .map_err(|_| {
            debug!(timeout_ms = timeout.as_millis(), message, "operation timed out");
            Error::timeout(message)
        })
}

/// Race `operation` against a timer without cancelling it.
///
/// The operation runs as a separate tokio task. If the timer wins, the task
/// is left running in the background and its eventual result is discarded.
///
/// # Errors
///
/// Returns [`Error::Timeout`] carrying `message` if the timer fires first.
///
/// Returns [`Error::Rejected`] if the task was cancelled before finishing,
/// for example because the runtime shut down.
///
/// # Panics
///
/// Resumes the operation's panic if it panicked before the timer fired.
pub async fn spawn_with_timeout<Fut, T>(
    timeout: Duration,
    message: &str,
    operation: Fut,
) -> Result<T>
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(operation);

    match tokio::time::timeout(timeout, handle).await {
        Ok(joined) => join_outcome(joined),
        Err(_) => {
            debug!(
                timeout_ms = timeout.as_millis(),
                message, "operation left running after timeout"
            );
            Err(Error::timeout(message))
        }
    }
}

fn join_outcome<T>(joined: std::result::Result<T, JoinError>) -> Result<T> {
    match joined {
        Ok(value) => Ok(value),
        Err(join_error) if join_error.is_panic() => {
            std::panic::resume_unwind(join_error.into_panic())
        }
        Err(join_error) => Err(Error::rejected(join_error.to_string())),
    }
}
