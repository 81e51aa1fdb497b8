//! Mock factories for procedure collaborators.
//!
//! This module provides stand-ins that record every call and return scripted
//! results:
//!
//! - [`MockFn`] - Recording callable with replaceable behaviour
//! - [`create_mock_context`] - Working directory plus recording logger and client
//! - [`create_mock_exec`] - Shell exec backed by a table of scripted results
//! - [`create_mock_fs`] - In-memory filesystem
//!
//! The collaborator contracts ([`Logger`], [`Client`], [`FileSystem`]) are
//! traits, so code under test can take the real implementation or a mock.
//!
//! # Mock Context
//!
//! ```rust
//! use testkit_support::mock::{create_mock_context, Logger, MockContextOptions};
//!
//! let ctx = create_mock_context(MockContextOptions::default().cwd("/repo"));
//! ctx.log.info("hello");
//!
//! assert!(ctx.log.info.was_called_with(&"hello".to_string()));
//! ```

mod context;
mod exec;
mod fs;
mod mock_fn;

pub use context::{
    create_mock_context, Client, Logger, MockClient, MockContext, MockContextOptions, MockLogger,
};
pub use exec::{create_mock_exec, ExecOutput, MockExec, MockExecResult};
pub use fs::{create_mock_fs, FileKind, FileStat, FileSystem, MockFs};
pub use mock_fn::{CallRecord, CallRecorder, MockFn};
