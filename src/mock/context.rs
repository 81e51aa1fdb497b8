//! Mock procedure execution context.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::MockFn;

/// Logging capability available to procedures.
pub trait Logger {
    /// Log at info level.
    fn info(&self, message: &str);
    /// Log at warn level.
    fn warn(&self, message: &str);
    /// Log at error level.
    fn error(&self, message: &str);
    /// Log at debug level.
    fn debug(&self, message: &str);
}

/// Client capability available to procedures.
pub trait Client {
    /// Call a procedure by path with a JSON input.
    fn call(&self, procedure: &str, input: Value) -> Value;
    /// Execute a command through the client.
    fn exec(&self, command: &str) -> Value;
}

/// Logger stand-in recording one mock per severity.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    /// Info-level calls.
    pub info: MockFn<String, ()>,
    /// Warn-level calls.
    pub warn: MockFn<String, ()>,
    /// Error-level calls.
    pub error: MockFn<String, ()>,
    /// Debug-level calls.
    pub debug: MockFn<String, ()>,
}

impl Logger for MockLogger {
    fn info(&self, message: &str) {
        self.info.call(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warn.call(message.to_string());
    }

    fn error(&self, message: &str) {
        self.error.call(message.to_string());
    }

    fn debug(&self, message: &str) {
        self.debug.call(message.to_string());
    }
}

/// Client stand-in. Both operations return `Value::Null` unless scripted.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    /// Procedure calls as `(procedure, input)`.
    pub call: MockFn<(String, Value), Value>,
    /// Exec calls by command string.
    pub exec: MockFn<String, Value>,
}

impl Client for MockClient {
    fn call(&self, procedure: &str, input: Value) -> Value {
        self.call.call((procedure.to_string(), input))
    }

    fn exec(&self, command: &str) -> Value {
        self.exec.call(command.to_string())
    }
}

/// A mock procedure context.
#[derive(Debug, Clone)]
pub struct MockContext {
    /// Working directory the procedure runs in.
    pub cwd: PathBuf,
    /// Recording logger.
    pub log: MockLogger,
    /// Recording client.
    pub client: MockClient,
}

impl MockContext {
    /// Working directory the procedure runs in.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

/// Options for [`create_mock_context`].
#[derive(Debug, Clone, Default)]
pub struct MockContextOptions {
    /// Working directory, the process current directory when unset.
    pub cwd: Option<PathBuf>,
}

impl MockContextOptions {
    /// Use `cwd` as the working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Create a mock context whose logger and client only record calls.
#[must_use]
pub fn create_mock_context(options: MockContextOptions) -> MockContext {
    let cwd = options
        .cwd
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    MockContext {
        cwd,
        log: MockLogger::default(),
        client: MockClient::default(),
    }
}
