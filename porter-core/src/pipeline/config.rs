//! Conversion options, loadable from a TOML file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options for one conversion.
///
/// Every field has a default, so a config file only needs the keys it
/// changes; missing keys keep the values below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub generate_types: bool,
    pub generate_hooks: bool,
    pub generate_services: bool,
    /// Emit a zustand store; only components with at least three state
    /// bindings get one, fewer stay on local `useState`
    pub generate_state_container: bool,
    pub generate_tests: bool,
    pub apply_optimizations: bool,

    /// Run the target project's test runner after persisting
    pub run_tests: bool,
    /// Run the target project's production build after persisting
    pub run_build: bool,

    /// Directory generated paths are resolved against
    pub output_root: PathBuf,
    /// Working directory for the test runner and build tool
    pub project_root: PathBuf,

    /// Minimum statement coverage in percent; clamped to 0-100 on use
    pub test_coverage_threshold: f64,
    pub build_timeout_secs: u64,

    /// Replaces the default test runner argv when non-empty
    pub test_command: Option<Vec<String>>,
    /// Replaces the default build argv when non-empty
    pub build_command: Option<Vec<String>>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            generate_types: true,
            generate_hooks: true,
            generate_services: true,
            generate_state_container: true,
            generate_tests: true,
            apply_optimizations: true,
            run_tests: false,
            run_build: false,
            output_root: PathBuf::from("src"),
            project_root: PathBuf::from("."),
            test_coverage_threshold: 80.0,
            build_timeout_secs: 300,
            test_command: None,
            build_command: None,
        }
    }
}

impl ConversionConfig {
    /// Load a (possibly partial) config file merged over the defaults
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn build_timeout(&self) -> Duration {
        Duration::from_secs(self.build_timeout_secs)
    }

    pub fn coverage_threshold(&self) -> f64 {
        if self.test_coverage_threshold.is_nan() {
            return 0.0;
        }
        self.test_coverage_threshold.clamp(0.0, 100.0)
    }

    /// Whether the conversion ends with a toolchain run
    pub fn runs_toolchain(&self) -> bool {
        self.run_tests || self.run_build
    }
}
