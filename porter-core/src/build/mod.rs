//! Build orchestration
//!
//! Runs the target project's test runner and build tool as subprocesses
//! and scrapes their output into a structured [`BuildOutcome`]. A failing
//! tool never becomes an `Err`: failures are reported in the outcome and
//! nothing already on disk is touched.

pub mod parser;
pub mod runner;
pub mod toolchain;

pub use parser::{OutputParser, ParsedOutput};
pub use runner::{CommandOutput, CommandRunner, TokioCommandRunner};
pub use toolchain::{CommandSpec, ToolchainAdapter, ViteToolchain};

use crate::pipeline::ConversionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to launch `{command}`: {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {secs}s")]
    TimedOut { command: String, secs: u64 },

    #[error("`{command}` failed with {}", exit_label(.exit_code))]
    ToolFailed { command: String, exit_code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code (terminated by signal)".to_string(), |c| format!("exit code {c}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetric {
    pub name: String,
    pub bytes: u64,
    pub compressed_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildMetrics {
    pub test_ms: u64,
    pub build_ms: u64,
    pub total_bundle_bytes: u64,
    pub chunks: Vec<ChunkMetric>,
    pub coverage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutcome {
    pub success: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: BuildMetrics,
}

impl Default for BuildOutcome {
    fn default() -> Self {
        Self { success: true, errors: Vec::new(), warnings: Vec::new(), metrics: BuildMetrics::default() }
    }
}

impl BuildOutcome {
    fn fail(&mut self, error: impl Into<String>) {
        self.success = false;
        self.errors.push(error.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Test,
    Build,
}

pub struct BuildOrchestrator {
    toolchain: Box<dyn ToolchainAdapter>,
    runner: Box<dyn CommandRunner>,
    parser: OutputParser,
    run_tests: bool,
    run_build: bool,
    coverage_threshold: f64,
}

impl BuildOrchestrator {
    pub fn new(toolchain: Box<dyn ToolchainAdapter>, runner: Box<dyn CommandRunner>) -> Self {
        Self { toolchain, runner, parser: OutputParser::new(), run_tests: true, run_build: false, coverage_threshold: 0.0 }
    }

    /// vite toolchain and tokio runner configured from `config`
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(Box::new(ViteToolchain::from_config(config)), Box::new(TokioCommandRunner))
            .with_steps(config.run_tests, config.run_build)
            .with_coverage_threshold(config.coverage_threshold())
    }

    pub fn with_steps(mut self, run_tests: bool, run_build: bool) -> Self {
        self.run_tests = run_tests;
        self.run_build = run_build;
        self
    }

    pub fn with_coverage_threshold(mut self, threshold: f64) -> Self {
        self.coverage_threshold = threshold.clamp(0.0, 100.0);
        self
    }

    /// Run the test runner and then the build tool, each when enabled.
    pub async fn run_build_and_test(&self) -> BuildOutcome {
        let mut outcome = BuildOutcome::default();
        if self.run_tests {
            self.run_step(Step::Test, &mut outcome).await;
        }
        if self.run_build {
            self.run_step(Step::Build, &mut outcome).await;
        }
        outcome.metrics.total_bundle_bytes = outcome.metrics.chunks.iter().map(|c| c.bytes).sum();

        if outcome.success {
            info!("{} toolchain run succeeded", self.toolchain.name());
        } else {
            warn!("{} toolchain run failed with {} errors", self.toolchain.name(), outcome.errors.len());
        }
        outcome
    }

    async fn run_step(&self, step: Step, outcome: &mut BuildOutcome) {
        let spec = match step {
            Step::Test => self.toolchain.test_command(),
            Step::Build => self.toolchain.build_command(),
        };
        info!("Running {}", spec);

        let output = match self.runner.run(&spec).await {
            Ok(output) => output,
            Err(e) => {
                warn!("{}", e);
                outcome.fail(e.to_string());
                return;
            }
        };

        let elapsed_ms = output.elapsed.as_millis() as u64;
        match step {
            Step::Test => outcome.metrics.test_ms += elapsed_ms,
            Step::Build => outcome.metrics.build_ms += elapsed_ms,
        }

        let parsed = self.parser.parse(&output.output);
        outcome.warnings.extend(parsed.warnings);
        outcome.metrics.chunks.extend(parsed.chunks);

        if !output.success {
            outcome.success = false;
            if parsed.errors.is_empty() {
                let failure = BuildError::ToolFailed { command: spec.to_string(), exit_code: output.exit_code };
                outcome.errors.push(failure.to_string());
            }
        }
        outcome.errors.extend(parsed.errors);

        if step == Step::Test {
            if let Some(coverage) = parsed.coverage {
                outcome.metrics.coverage = Some(coverage);
                if coverage < self.coverage_threshold {
                    outcome.fail(format!(
                        "Coverage {coverage:.2}% is below the {:.0}% threshold",
                        self.coverage_threshold
                    ));
                }
            }
        }
    }
}
