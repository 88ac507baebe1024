//! Sequences the conversion stages for one component

use super::persist::persist;
use super::{ConversionConfig, ConversionMetrics, ConversionResult};
use crate::analysis::PatternExtractor;
use crate::build::BuildOrchestrator;
use crate::diagnostics::DiagnosticKind;
use crate::optimize::RewriteOptimizer;
use crate::synthesis::{ArtifactSynthesizer, GeneratedFile};
use crate::test_gen::TestSynthesizer;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Owns one instance of every stage and runs them in order:
/// analyze, synthesize, synthesize tests, optimize, persist, build.
pub struct PipelineCoordinator {
    config: ConversionConfig,
    extractor: PatternExtractor,
    synthesizer: ArtifactSynthesizer,
    tests: TestSynthesizer,
    optimizer: RewriteOptimizer,
    orchestrator: BuildOrchestrator,
}

impl PipelineCoordinator {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            extractor: PatternExtractor::new(),
            synthesizer: ArtifactSynthesizer::new(config.clone()),
            tests: TestSynthesizer::default(),
            optimizer: RewriteOptimizer::new(),
            orchestrator: BuildOrchestrator::from_config(&config),
            config,
        }
    }

    pub fn with_optimizer(mut self, optimizer: RewriteOptimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_orchestrator(mut self, orchestrator: BuildOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert one component. Always returns a result; failures are
    /// reported through its diagnostics.
    pub async fn convert(&self, source: &str, declared_name: Option<&str>) -> ConversionResult {
        let started = Instant::now();
        let analysis = self.extractor.analyze(source, declared_name);
        info!("Converting {} ({} tier)", analysis.component_name, analysis.structural_tier);

        let mut result = ConversionResult {
            component_name: analysis.component_name.clone(),
            files: Vec::new(),
            diagnostics: analysis.diagnostics.clone(),
            metrics: ConversionMetrics { complexity: analysis.complexity_class(), ..ConversionMetrics::default() },
            build_outcome: None,
        };

        if result.diagnostics.has_errors() {
            warn!("Analysis of {} failed, nothing generated", analysis.component_name);
            return result.finish(started);
        }

        let mut files = match self.synthesizer.generate(&analysis) {
            Ok(files) => files,
            Err(e) => {
                result.diagnostics.record(DiagnosticKind::GenerationError, e.to_string());
                return result.finish(started);
            }
        };
        if analysis.render_markup.is_none() {
            result.diagnostics.record(
                DiagnosticKind::AnalysisWarning,
                format!("No render markup found in {}, emitted a placeholder", analysis.component_name),
            );
        }

        if self.config.generate_tests {
            match self.tests.generate(&analysis, &files) {
                Ok(tests) => files.extend(tests),
                Err(e) => {
                    result.diagnostics.record(DiagnosticKind::GenerationError, format!("{:#}", e));
                    return result.finish(started);
                }
            }
        }

        if self.config.apply_optimizations {
            let report = self.optimizer.optimize(&mut files);
            result.diagnostics.extend(report.diagnostics);
            result.metrics.applied_optimizations = report.applied;
        }

        let persisted = persist(&self.config.output_root, files).await;
        result.diagnostics.extend(persisted.diagnostics);
        result.files = persisted.written;
        debug!("Persisted {} files under {}", result.files.len(), self.config.output_root.display());

        if self.config.runs_toolchain() {
            let outcome = self.orchestrator.run_build_and_test().await;
            if !outcome.success {
                result.diagnostics.record(
                    DiagnosticKind::BuildError,
                    format!("Toolchain run failed with {} errors", outcome.errors.len()),
                );
            }
            result.build_outcome = Some(outcome);
        }

        result.finish(started)
    }
}

impl ConversionResult {
    fn finish(mut self, started: Instant) -> Self {
        self.metrics.elapsed_ms = started.elapsed().as_millis() as u64;
        self.metrics.file_count = self.files.len();
        self.metrics.line_count = self.files.iter().map(GeneratedFile::line_count).sum();
        info!(
            "Converted {}: {} files, {} errors, {} warnings",
            self.component_name,
            self.metrics.file_count,
            self.diagnostics.errors.len(),
            self.diagnostics.warnings.len()
        );
        self
    }
}

impl Default for PipelineCoordinator {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
