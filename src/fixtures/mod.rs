//! Filesystem and repository fixtures.
//!
//! Fixtures build the on-disk state a test needs and hand ownership of it
//! back to the test:
//!
//! - [`create_temp_dir`] / [`cleanup_temp_dir`] - Explicitly managed temp dirs
//! - [`ScopedTempDir`] - Temp dir removed on drop
//! - [`create_package_json`] / [`write_package_json`] - Package descriptors
//! - [`write_ts_file`] - Source files with parent directories created
//! - [`init_git_repo`] - A git repository with a fixed test identity
//!
//! # Example
//!
//! ```rust,no_run
//! use testkit_support::fixtures::{
//!     cleanup_temp_dir, create_temp_dir, write_package_json, PackageJsonFixture,
//! };
//!
//! # async fn demo() -> testkit_support::Result<()> {
//! let dir = create_temp_dir("pkg-").await?;
//! write_package_json(&dir, &PackageJsonFixture::new("my-pkg")).await?;
//! cleanup_temp_dir(&dir).await?;
//! # Ok(())
//! # }
//! ```

mod git;
mod package;
mod temp_dir;

pub use git::{init_git_repo, GitInitOptions, TEST_USER_EMAIL, TEST_USER_NAME};
pub use package::{
    create_package_json, write_package_json, write_ts_file, PackageJson, PackageJsonFixture,
    DEFAULT_PACKAGE_VERSION,
};
pub use temp_dir::{cleanup_temp_dir, create_temp_dir, ScopedTempDir, DEFAULT_TEMP_PREFIX};
