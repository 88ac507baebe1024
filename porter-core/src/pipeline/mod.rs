//! Pipeline coordination
//!
//! Ties the stages together: a component's source goes in, a
//! [`ConversionResult`] comes out listing every file written under the
//! configured output root, the diagnostics raised along the way and,
//! when requested, the outcome of the target project's test and build run.

pub mod config;
pub mod coordinator;
pub mod persist;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, ConversionConfig};
pub use coordinator::PipelineCoordinator;
pub use persist::{PersistReport, persist};

use crate::analysis::ComplexityClass;
use crate::build::BuildOutcome;
use crate::diagnostics::Diagnostics;
use crate::optimize::AppliedOptimization;
use crate::synthesis::GeneratedFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetrics {
    pub elapsed_ms: u64,
    pub file_count: usize,
    pub line_count: usize,
    pub applied_optimizations: Vec<AppliedOptimization>,
    pub complexity: ComplexityClass,
}

impl Default for ConversionMetrics {
    fn default() -> Self {
        Self {
            elapsed_ms: 0,
            file_count: 0,
            line_count: 0,
            applied_optimizations: Vec::new(),
            complexity: ComplexityClass::Low,
        }
    }
}

/// Everything one conversion produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub component_name: String,
    /// Files actually written, in generation order
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Diagnostics,
    pub metrics: ConversionMetrics,
    pub build_outcome: Option<BuildOutcome>,
}

impl ConversionResult {
    pub fn success(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn test_files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(|f| f.is_test())
    }

    /// Pretty JSON of the result with the derived `success` flag alongside
    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = serde_json::json!({ "success": self.success(), "result": self });
        serde_json::to_string_pretty(&report)
    }
}

/// Convert one component with a coordinator built from `config`.
pub async fn convert(source: &str, declared_name: Option<&str>, config: ConversionConfig) -> ConversionResult {
    PipelineCoordinator::new(config).convert(source, declared_name).await
}
