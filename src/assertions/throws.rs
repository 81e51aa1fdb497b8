//! Assert that an operation fails.

use std::fmt::Display;
use std::future::Future;

use super::ExpectedMessage;
use crate::error::{Error, Result};

/// Run `f` and assert that it returns an error.
///
/// On success returns the caught error so the test can inspect it further.
///
/// # Errors
///
/// Returns [`Error::DidNotThrow`] if `f` succeeded, or
/// [`Error::AssertionFailed`] if its error message does not satisfy
/// `expected`.
pub async fn assert_throws<F, Fut, T, E>(f: F, expected: impl Into<ExpectedMessage>) -> Result<E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    check(f().await, &expected.into())
}

/// Blocking variant of [`assert_throws`].
///
/// # Errors
///
/// Same as [`assert_throws`].
pub fn assert_throws_sync<F, T, E>(f: F, expected: impl Into<ExpectedMessage>) -> Result<E>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Display,
{
    check(f(), &expected.into())
}

fn check<T, E: Display>(
    outcome: std::result::Result<T, E>,
    expected: &ExpectedMessage,
) -> Result<E> {
    let err = match outcome {
        Ok(_) => return Err(Error::DidNotThrow),
        Err(err) => err,
    };

    let message = err.to_string();
    if expected.matches(&message) {
        Ok(err)
    } else {
        Err(Error::assertion_failed(expected.describe_mismatch(&message)))
    }
}
