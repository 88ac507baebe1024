//! Rewrite optimizer
//!
//! Applies an ordered list of textual optimization passes to generated
//! artifacts. Every pass guards itself with an applicability check, so
//! running the optimizer over its own output changes nothing. A pass that
//! fails, or whose output no longer balances its delimiters, is skipped
//! with a warning and the remaining passes still run.

pub mod deps;
pub mod passes;

pub use passes::{LazyMedia, MemoizeComponent, MemoizeDerivedValues, ResponseCache, StableCallbacks};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::synthesis::{ArtifactKind, GeneratedFile};
use crate::text;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PassError {
    #[error("Anchor not found: {0}")]
    AnchorNotFound(String),

    #[error("Output of {0} is structurally unbalanced")]
    Unbalanced(String),
}

pub type PassResult = std::result::Result<String, PassError>;

/// A stateless rewrite over one artifact's text.
pub trait OptimizationPass: Send + Sync {
    fn name(&self) -> &'static str;

    /// Artifact kinds the pass understands
    fn targets(&self, kind: ArtifactKind) -> bool;

    /// False once the pass has already been applied to `content`
    fn is_applicable(&self, content: &str) -> bool;

    fn transform(&self, content: &str) -> PassResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOptimization {
    pub pass: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub applied: Vec<AppliedOptimization>,
    pub diagnostics: Diagnostics,
}

impl OptimizationReport {
    pub fn pass_names(&self) -> Vec<&str> {
        self.applied.iter().map(|a| a.pass.as_str()).collect()
    }
}

pub struct RewriteOptimizer {
    passes: Vec<Box<dyn OptimizationPass>>,
}

impl RewriteOptimizer {
    /// Optimizer with the built-in passes in their fixed order
    pub fn new() -> Self {
        Self::with_passes(vec![
            Box::new(MemoizeComponent),
            Box::new(StableCallbacks),
            Box::new(MemoizeDerivedValues),
            Box::new(LazyMedia),
            Box::new(ResponseCache),
        ])
    }

    pub fn with_passes(passes: Vec<Box<dyn OptimizationPass>>) -> Self {
        Self { passes }
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Rewrite `files` in place. Paths and order never change; test
    /// artifacts are left untouched.
    pub fn optimize(&self, files: &mut [GeneratedFile]) -> OptimizationReport {
        let mut report = OptimizationReport::default();

        for file in files.iter_mut().filter(|f| !f.is_test()) {
            let path = file.display_path();
            for pass in &self.passes {
                if !pass.targets(file.artifact_kind) || !pass.is_applicable(&file.content) {
                    continue;
                }

                let outcome = pass.transform(&file.content).and_then(|output| {
                    if text::is_balanced(&file.content) && !text::is_balanced(&output) {
                        Err(PassError::Unbalanced(pass.name().to_string()))
                    } else {
                        Ok(output)
                    }
                });

                match outcome {
                    Ok(output) if output != file.content => {
                        debug!("Applied {} to {}", pass.name(), path);
                        file.content = output;
                        report.applied.push(AppliedOptimization { pass: pass.name().to_string(), path: path.clone() });
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Skipping {} on {}: {}", pass.name(), path, e);
                        report
                            .diagnostics
                            .record(DiagnosticKind::OptimizationWarning, format!("{} skipped on {}: {}", pass.name(), path, e));
                    }
                }
            }
        }

        info!("Applied {} optimizations", report.applied.len());
        report
    }
}

impl Default for RewriteOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
