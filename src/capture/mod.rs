//! Console channels with scoped capture.
//!
//! Code that reports through [`log`] / [`error`] (or the [`console_log!`] /
//! [`console_error!`] macros) writes to stdout / stderr normally. Inside
//! [`capture_output`] the same calls are collected into buffers instead, and
//! the real channels are restored when the scope ends, whether it completes,
//! fails or panics.
//!
//! The redirection is process-wide. Two captures must never overlap: run
//! tests that capture output serially (for example with `serial_test`).
//!
//! # Example
//!
//! ```rust
//! use testkit_support::capture::capture_output_sync;
//! use testkit_support::console_log;
//!
//! let output = capture_output_sync(|| {
//!     console_log!("hello {}", 42);
//!     Ok::<_, std::convert::Infallible>(())
//! })
//! .unwrap();
//!
//! assert_eq!(output.stdout, vec!["hello 42"]);
//! ```
//!
//! [`console_log!`]: crate::console_log
//! [`console_error!`]: crate::console_error

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lines collected during one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Lines written through [`log`].
    pub stdout: Vec<String>,
    /// Lines written through [`error`].
    pub stderr: Vec<String>,
}

type Buffer = Arc<Mutex<CapturedOutput>>;

static ACTIVE: Mutex<Option<Buffer>> = parking_lot::const_mutex(None);

/// Write a line to the stdout channel.
pub fn log(message: impl Display) {
    let active = ACTIVE.lock().clone();
    match active {
        Some(buffer) => buffer.lock().stdout.push(message.to_string()),
        None => println!("{message}"),
    }
}

/// Write a line to the stderr channel.
pub fn error(message: impl Display) {
    let active = ACTIVE.lock().clone();
    match active {
        Some(buffer) => buffer.lock().stderr.push(message.to_string()),
        None => eprintln!("{message}"),
    }
}

/// Whether a capture is currently installed.
#[must_use]
pub fn is_capturing() -> bool {
    ACTIVE.lock().is_some()
}

/// Write a formatted line to the stdout channel.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::capture::log(::std::format_args!($($arg)*))
    };
}

/// Write a formatted line to the stderr channel.
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {
        $crate::capture::error(::std::format_args!($($arg)*))
    };
}

/// Restores the channels that were active before a capture began.
struct CaptureGuard {
    previous: Option<Buffer>,
}

impl CaptureGuard {
    fn install(buffer: &Buffer) -> Self {
        let previous = ACTIVE.lock().replace(Arc::clone(buffer));
        Self { previous }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        *ACTIVE.lock() = self.previous.take();
    }
}

fn take(buffer: &Buffer) -> CapturedOutput {
    std::mem::take(&mut *buffer.lock())
}

/// Collect console output written while `f` runs.
///
/// # Errors
///
/// Returns the error of `f`, after the channels have been restored.
pub async fn capture_output<F, Fut, E>(f: F) -> Result<CapturedOutput, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let buffer = Buffer::default();
    let guard = CaptureGuard::install(&buffer);
    let outcome = f().await;
    drop(guard);

    outcome?;
    Ok(take(&buffer))
}

/// Blocking variant of [`capture_output`].
///
/// # Errors
///
/// Returns the error of `f`, after the channels have been restored.
pub fn capture_output_sync<F, E>(f: F) -> Result<CapturedOutput, E>
where
    F: FnOnce() -> Result<(), E>,
{
    let buffer = Buffer::default();
    let guard = CaptureGuard::install(&buffer);
    let outcome = f();
    drop(guard);

    outcome?;
    Ok(take(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_sync_capture_separates_channels() {
        let output = capture_output_sync(|| {
            log("out 1");
            error("err 1");
            console_log!("out {}", 2);
            Ok::<_, Error>(())
        })
        .unwrap();

        assert_eq!(output.stdout, vec!["out 1", "out 2"]);
        assert_eq!(output.stderr, vec!["err 1"]);
        assert!(!is_capturing());
    }

    #[test]
    #[serial]
    fn test_sync_capture_restores_on_error() {
        let err = capture_output_sync(|| {
            log("lost");
            Err(Error::assertion_failed("inner failure"))
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "inner failure");
        assert!(!is_capturing());
    }

    #[test]
    #[serial]
    fn test_sync_capture_restores_on_panic() {
        let result = std::panic::catch_unwind(|| {
            let _ = capture_output_sync(|| -> Result<(), Error> {
                log("before panic");
                panic!("boom");
            });
        });

        assert!(result.is_err());
        assert!(!is_capturing());
    }

    #[test]
    #[serial]
    fn test_nested_capture_restores_outer() {
        let outer = capture_output_sync(|| {
            log("outer before");
            let inner = capture_output_sync(|| {
                log("inner");
                Ok::<_, Error>(())
            })?;
            assert_eq!(inner.stdout, vec!["inner"]);
            log("outer after");
            Ok::<_, Error>(())
        })
        .unwrap();

        assert_eq!(outer.stdout, vec!["outer before", "outer after"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_async_capture_across_await() {
        let output = capture_output(|| async {
            console_log!("hello");
            tokio::task::yield_now().await;
            console_error!("warning: {}", "late");
            Ok::<_, Error>(())
        })
        .await
        .unwrap();

        assert_eq!(
            output,
            CapturedOutput {
                stdout: vec!["hello".to_string()],
                stderr: vec!["warning: late".to_string()],
            }
        );
        assert!(!is_capturing());
    }
}
