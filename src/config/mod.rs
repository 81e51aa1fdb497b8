//! Shared test-runner configuration.
//!
//! [`shared_config`] is the baseline every package's runner configuration
//! starts from. Packages adjust it with the builder setters, or with
//! [`RunnerConfig::merged`] for the shallow override pattern where whole
//! top-level keys are replaced:
//!
//! ```rust
//! use testkit_support::config::shared_config;
//! use serde_json::json;
//!
//! let config = shared_config()
//!     .merged(json!({ "include": ["tests/**/*.rs"], "testTimeout": 30000 }))
//!     .unwrap();
//!
//! assert_eq!(config.include, vec!["tests/**/*.rs"]);
//! assert_eq!(config.test_timeout.as_secs(), 30);
//! assert_eq!(config.hook_timeout.as_secs(), 10);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Runner configuration consumed by the test harness.
///
/// Serialized with the runner's camelCase key names; timeouts are written as
/// whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    /// Inject test identifiers as globals.
    pub globals: bool,
    /// Execution environment name.
    pub environment: String,
    /// Per-test timeout.
    #[serde(with = "duration_ms")]
    pub test_timeout: Duration,
    /// Per-hook (setup/teardown) timeout.
    #[serde(with = "duration_ms")]
    pub hook_timeout: Duration,
    /// Reporter names.
    pub reporters: Vec<String>,
    /// Coverage instrumentation.
    pub coverage: CoverageConfig,
    /// Parallel execution pool.
    pub pool: Pool,
    /// Pool tuning.
    pub pool_options: PoolOptions,
    /// Test file globs. Empty in the shared baseline; each package sets its
    /// own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Coverage instrumentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Coverage provider.
    pub provider: String,
    /// Report formats.
    pub reporter: Vec<String>,
    /// Globs excluded from instrumentation.
    pub exclude: Vec<String>,
}

/// Kind of worker pool tests run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    /// Worker threads.
    Threads,
    /// Child processes.
    Forks,
}

/// Pool tuning, keyed by pool kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolOptions {
    /// Options for [`Pool::Threads`].
    pub threads: ThreadPoolOptions,
}

/// Thread pool tuning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPoolOptions {
    /// Run every test file on one thread.
    pub single_thread: bool,
}

/// The shared baseline configuration.
#[must_use]
pub fn shared_config() -> RunnerConfig {
    RunnerConfig::default()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            globals: false,
            environment: "node".to_string(),
            test_timeout: Duration::from_secs(10),
            hook_timeout: Duration::from_secs(10),
            reporters: vec!["default".to_string()],
            coverage: CoverageConfig::default(),
            pool: Pool::Threads,
            pool_options: PoolOptions::default(),
            include: Vec::new(),
        }
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            provider: "v8".to_string(),
            reporter: ["text", "json", "html"].map(String::from).to_vec(),
            exclude: [
                "node_modules/**",
                "dist/**",
                "**/*.d.ts",
                "**/*.test.ts",
                "**/index.ts",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl RunnerConfig {
    /// Set the per-test timeout.
    #[must_use]
    pub fn test_timeout(mut self, timeout: Duration) -> Self {
        self.test_timeout = timeout;
        self
    }

    /// Set the per-hook timeout.
    #[must_use]
    pub fn hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout = timeout;
        self
    }

    /// Replace the test file globs.
    #[must_use]
    pub fn include<I, S>(mut self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = globs.into_iter().map(Into::into).collect();
        self
    }

    /// Add a reporter.
    #[must_use]
    pub fn reporter(mut self, name: impl Into<String>) -> Self {
        self.reporters.push(name.into());
        self
    }

    /// Run everything on a single thread.
    #[must_use]
    pub fn single_thread(mut self) -> Self {
        self.pool_options.threads.single_thread = true;
        self
    }

    /// Apply a shallow override.
    ///
    /// Each top-level key of `overrides` replaces the whole value under that
    /// key; nested objects are not merged. Keys use the serialized camelCase
    /// names. A non-object `overrides` leaves the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if an override has the
    /// wrong shape for its key.
    pub fn merged(&self, overrides: Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        if let (Value::Object(base), Value::Object(overrides)) = (&mut base, overrides) {
            for (key, value) in overrides {
                base.insert(key, value);
            }
        }
        Ok(serde_json::from_value(base)?)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shared_defaults() {
        let config = shared_config();

        assert!(!config.globals);
        assert_eq!(config.environment, "node");
        assert_eq!(config.test_timeout, Duration::from_secs(10));
        assert_eq!(config.hook_timeout, Duration::from_secs(10));
        assert_eq!(config.reporters, vec!["default"]);
        assert_eq!(config.coverage.provider, "v8");
        assert_eq!(config.coverage.reporter, vec!["text", "json", "html"]);
        assert!(config.coverage.exclude.contains(&"dist/**".to_string()));
        assert!(config.coverage.exclude.contains(&"**/*.d.ts".to_string()));
        assert_eq!(config.pool, Pool::Threads);
        assert!(!config.pool_options.threads.single_thread);
        assert!(config.include.is_empty());
    }

    #[test]
    fn test_baseline_leaves_include_to_packages() {
        let value = serde_json::to_value(shared_config()).unwrap();
        assert!(value.get("include").is_none());

        let config = shared_config().include(["src/**/*.test.ts"]);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["include"], json!(["src/**/*.test.ts"]));
    }

    #[test]
    fn test_serialized_key_names() {
        let value = serde_json::to_value(shared_config()).unwrap();

        assert_eq!(value["testTimeout"], json!(10000));
        assert_eq!(value["hookTimeout"], json!(10000));
        assert_eq!(value["pool"], json!("threads"));
        assert_eq!(value["poolOptions"], json!({ "threads": { "singleThread": false } }));
    }

    #[test]
    fn test_builder_setters() {
        let config = shared_config()
            .test_timeout(Duration::from_secs(30))
            .hook_timeout(Duration::from_secs(5))
            .include(["tests/**/*.rs"])
            .reporter("json")
            .single_thread();

        assert_eq!(config.test_timeout, Duration::from_secs(30));
        assert_eq!(config.hook_timeout, Duration::from_secs(5));
        assert_eq!(config.include, vec!["tests/**/*.rs"]);
        assert_eq!(config.reporters, vec!["default", "json"]);
        assert!(config.pool_options.threads.single_thread);
    }

    #[test]
    fn test_merge_replaces_whole_keys() {
        let config = shared_config()
            .merged(json!({
                "coverage": { "provider": "istanbul", "reporter": [], "exclude": [] }
            }))
            .unwrap();

        assert_eq!(config.coverage.provider, "istanbul");
        assert!(config.coverage.exclude.is_empty());
        assert_eq!(config.environment, "node");
    }

    #[test]
    fn test_merge_rejects_partial_nested_object() {
        let result = shared_config().merged(json!({ "coverage": { "provider": "istanbul" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_non_object_is_noop() {
        let config = shared_config().merged(Value::Null).unwrap();
        assert_eq!(config, shared_config());
    }
}
