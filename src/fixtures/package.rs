//! Package descriptor and source file fixtures.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Version written when a fixture does not specify one.
pub const DEFAULT_PACKAGE_VERSION: &str = "1.0.0";

/// Options for building a package descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageJsonFixture {
    /// Package name.
    pub name: String,
    /// Package version, [`DEFAULT_PACKAGE_VERSION`] when unset.
    pub version: Option<String>,
    /// Runtime dependencies, empty when unset.
    pub dependencies: Option<BTreeMap<String, String>>,
    /// Development dependencies, empty when unset.
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageJsonFixture {
    /// Create options for a package with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a runtime dependency.
    #[must_use]
    pub fn dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), range.into());
        self
    }

    /// Add a development dependency.
    #[must_use]
    pub fn dev_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dev_dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), range.into());
        self
    }
}

/// A package descriptor as written to `package.json`.
///
/// Field order here is the order of keys in the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Module system marker, always `"module"`.
    #[serde(rename = "type")]
    pub module_type: String,
    /// Runtime dependencies.
    pub dependencies: BTreeMap<String, String>,
    /// Development dependencies.
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Build a package descriptor with defaults applied.
#[must_use]
pub fn create_package_json(options: &PackageJsonFixture) -> PackageJson {
    PackageJson {
        name: options.name.clone(),
        version: options
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_PACKAGE_VERSION.to_string()),
        module_type: "module".to_string(),
        dependencies: options.dependencies.clone().unwrap_or_default(),
        dev_dependencies: options.dev_dependencies.clone().unwrap_or_default(),
    }
}

/// Write `package.json` into `dir` as 2-space indented JSON.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if serialization fails and
/// [`Error::Io`](crate::Error::Io) if the file cannot be written.
pub async fn write_package_json(dir: impl AsRef<Path>, options: &PackageJsonFixture) -> Result<()> {
    let path = dir.as_ref().join("package.json");
    let content = serde_json::to_string_pretty(&create_package_json(options))?;
    tokio::fs::write(&path, content).await?;
    debug!(path = %path.display(), name = %options.name, "wrote package.json");
    Ok(())
}

/// Write a source file, creating any missing parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if a directory or the file cannot
/// be created.
pub async fn write_ts_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
