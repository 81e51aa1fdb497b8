//! Error definitions
//!
//! This module provides the error type shared by fixtures, mocks and the
//! async test utilities. The taxonomy is deliberately flat: callers match on
//! the variant when they care and otherwise assert on the message.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Main error type for testkit-support
#[derive(Error, Debug)]
pub enum Error {
    /// A polled condition never became true.
    #[error("Condition not met within {}ms", .0.as_millis())]
    ConditionTimeout(Duration),

    /// An operation raced against a timer and lost.
    #[error("{0}")]
    Timeout(String),

    /// Assertion failed
    #[error("{0}")]
    AssertionFailed(String),

    /// The function passed to `assert_throws` completed successfully.
    #[error("Expected function to throw")]
    DidNotThrow,

    /// The mock exec table has no entry for a command.
    #[error("No mock result for command: {0}")]
    NoMockResult(String),

    /// A mock filesystem lookup missed.
    #[error("ENOENT: {0}")]
    NotFound(String),

    /// A scripted command exited with a non-zero code.
    #[error("Command failed: {command}")]
    CommandFailed {
        /// The command string as invoked.
        command: String,
        /// Scripted standard output.
        stdout: String,
        /// Scripted standard error.
        stderr: String,
        /// Scripted exit code.
        exit_code: i32,
    },

    /// A real `git` invocation exited unsuccessfully.
    #[error("{program} {} failed ({status}): {stderr}", .args.join(" "))]
    Git {
        /// Program that was run.
        program: String,
        /// Arguments passed to it.
        args: Vec<String>,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A deferred value was rejected.
    #[error("{0}")]
    Rejected(String),

    /// Filesystem or process error, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an assertion failure.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a timeout error with a custom message.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a rejection error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Whether this error came from an exhausted time window.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConditionTimeout(_) | Self::Timeout(_))
    }

    /// Whether this error is a missing mock entry or missing path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NoMockResult(_) | Self::NotFound(_) => true,
            Self::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
