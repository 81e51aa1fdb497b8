//! # testkit-support 🧰
//!
//! > Shared test fixtures, mocks and async utilities
//!
//! **testkit-support** collects the helpers every package's test suite ends
//! up needing: temp directories and project files, recording mocks for the
//! procedure context, async polling and timeouts, and a shared runner
//! configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use testkit_support::prelude::*;
//!
//! #[testkit_support::test]
//! async fn writes_package(dir: ScopedTempDir) {
//!     write_package_json(dir.path(), &PackageJsonFixture::new("demo")).await.unwrap();
//!
//!     let ctx = create_mock_context(MockContextOptions::default().cwd(dir.path()));
//!     ctx.log.info("written");
//!     assert!(ctx.log.info.was_called());
//! }
//! ```
//!
//! ## Features
//!
//! - 📁 **Fixtures** - Temp dirs, `package.json`, source files, git repos
//! - 🎭 **Mocks** - Recording context, exec table and in-memory filesystem
//! - ⏱️ **Timing** - `sleep`, `wait_for`, `with_timeout`
//! - 🤝 **Deferred** - Futures settled by the test
//! - 📢 **Output capture** - Scoped console capture with guaranteed restore
//! - ⚙️ **Runner config** - Shared defaults with shallow overrides

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod capture;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod mock;
pub mod sync;
pub mod timing;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_support::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::{assert_throws, assert_throws_sync, ExpectedMessage};
    pub use crate::capture::{capture_output, capture_output_sync, CapturedOutput};
    pub use crate::config::{shared_config, RunnerConfig};
    pub use crate::error::{Error, Result};
    pub use crate::fixtures::{
        cleanup_temp_dir, create_package_json, create_temp_dir, init_git_repo,
        write_package_json, write_ts_file, GitInitOptions, PackageJsonFixture, ScopedTempDir,
    };
    pub use crate::mock::{
        create_mock_context, create_mock_exec, create_mock_fs, Client, FileSystem, Logger,
        MockContextOptions, MockExecResult, MockFn,
    };
    pub use crate::sync::{create_deferred, Deferred};
    pub use crate::timing::{sleep, wait_for, with_timeout, WaitOptions};
    pub use crate::{console_error, console_log};
}

// Re-exports
pub use error::{Error, Result};

// Re-export the test macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use testkit_support_macros::test;

#[doc(hidden)]
pub mod __private {
    pub use tokio;
}
