//! Scripted shell-exec mock.

use std::collections::HashMap;

use tracing::debug;

use super::MockFn;
use crate::error::{Error, Result};

/// Scripted outcome of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockExecResult {
    /// Standard output text.
    pub stdout: String,
    /// Standard error text.
    pub stderr: String,
    /// Exit code; anything non-zero makes the call fail.
    pub exit_code: i32,
}

impl MockExecResult {
    /// A successful result with the given stdout.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// A failing result with the given exit code and stderr.
    #[must_use]
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code,
            ..Self::default()
        }
    }

    /// Set stdout.
    #[must_use]
    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Set stderr.
    #[must_use]
    pub fn stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Output of a successful mocked command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output text.
    pub stdout: String,
    /// Standard error text.
    pub stderr: String,
}

/// A recording exec function keyed by exact command string.
pub type MockExec = MockFn<String, Result<ExecOutput>>;

/// Create an exec mock backed by a table of scripted results.
///
/// Lookups are by exact command string. A command with no entry fails with
/// [`Error::NoMockResult`]; a non-zero exit code fails with
/// [`Error::CommandFailed`] carrying the scripted output.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use testkit_support::mock::{create_mock_exec, MockExecResult};
///
/// let exec = create_mock_exec(HashMap::from([
///     ("git status".to_string(), MockExecResult::success("clean")),
/// ]));
///
/// assert_eq!(exec.call("git status".into()).unwrap().stdout, "clean");
/// assert!(exec.call("git push".into()).is_err());
/// ```
#[must_use]
pub fn create_mock_exec(results: HashMap<String, MockExecResult>) -> MockExec {
    MockFn::with_implementation(move |command: String| {
        let Some(result) = results.get(&command) else {
            debug!(%command, "no scripted result for command");
            return Err(Error::NoMockResult(command));
        };

        if result.exit_code != 0 {
            return Err(Error::CommandFailed {
                command,
                stdout: result.stdout.clone(),
                stderr: result.stderr.clone(),
                exit_code: result.exit_code,
            });
        }

        Ok(ExecOutput {
            stdout: result.stdout.clone(),
            stderr: result.stderr.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> HashMap<String, MockExecResult> {
        HashMap::from([
            (
                "pnpm build".to_string(),
                MockExecResult::success("built").stderr("warn: slow"),
            ),
            (
                "pnpm test".to_string(),
                MockExecResult::failure(1, "1 failed").stdout("ran 3 tests"),
            ),
        ])
    }

    #[test]
    fn test_success_returns_output() {
        let exec = create_mock_exec(table());

        let output = exec.call("pnpm build".to_string()).unwrap();

        assert_eq!(
            output,
            ExecOutput {
                stdout: "built".into(),
                stderr: "warn: slow".into(),
            }
        );
    }

    #[test]
    fn test_missing_command_is_hard_failure() {
        let exec = create_mock_exec(table());

        let err = exec.call("pnpm lint".to_string()).unwrap_err();

        assert_eq!(err.to_string(), "No mock result for command: pnpm lint");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_non_zero_exit_carries_output() {
        let exec = create_mock_exec(table());

        let err = exec.call("pnpm test".to_string()).unwrap_err();

        assert_eq!(err.to_string(), "Command failed: pnpm test");
        match err {
            Error::CommandFailed {
                stdout,
                stderr,
                exit_code,
                ..
            } => {
                assert_eq!(stdout, "ran 3 tests");
                assert_eq!(stderr, "1 failed");
                assert_eq!(exit_code, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let exec = create_mock_exec(table());
        assert!(exec.call("pnpm build ".to_string()).is_err());
    }

    #[test]
    fn test_calls_recorded_including_failures() {
        let exec = create_mock_exec(table());

        let _ = exec.call("pnpm build".to_string());
        let _ = exec.call("unknown".to_string());

        assert_eq!(exec.call_args(), vec!["pnpm build", "unknown"]);
    }
}
