//! Test synthesizer: one test module per generated artifact

use super::frameworks::{TestFrameworkAdapter, VitestAdapter};
use super::strategies::{
    ComponentStrategy, HookStrategy, ServiceStrategy, StoreStrategy, TestContext, TestStrategy, TypesStrategy,
};
use crate::analysis::ComponentAnalysis;
use crate::synthesis::{ArtifactKind, ArtifactLayout, ArtifactPlan, GeneratedFile};
use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

/// Generates test files for synthesized artifacts
pub struct TestSynthesizer {
    adapter: Box<dyn TestFrameworkAdapter>,
    strategies: Vec<Box<dyn TestStrategy>>,
}

impl TestSynthesizer {
    pub fn new(adapter: Box<dyn TestFrameworkAdapter>) -> Self {
        let strategies: Vec<Box<dyn TestStrategy>> = vec![
            Box::new(ComponentStrategy),
            Box::new(TypesStrategy),
            Box::new(HookStrategy),
            Box::new(ServiceStrategy),
            Box::new(StoreStrategy),
        ];
        Self { adapter, strategies }
    }

    pub fn framework_name(&self) -> &str {
        self.adapter.framework_name()
    }

    fn strategy_for(&self, kind: ArtifactKind) -> Option<&dyn TestStrategy> {
        self.strategies.iter().find(|s| s.target() == kind).map(|s| s.as_ref())
    }

    /// Test files for every non-test artifact in `files`, in the same order.
    pub fn generate(&self, analysis: &ComponentAnalysis, files: &[GeneratedFile]) -> Result<Vec<GeneratedFile>> {
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let plan = files.iter().fold(ArtifactPlan::default(), |mut plan, file| {
            match file.artifact_kind {
                ArtifactKind::Types => plan.types = true,
                ArtifactKind::Hook => plan.hook = true,
                ArtifactKind::Service => plan.service = true,
                ArtifactKind::Store => plan.store = true,
                ArtifactKind::Component | ArtifactKind::Test => {}
            }
            plan
        });

        let mut tests = Vec::new();
        for file in files.iter().filter(|f| !f.is_test()) {
            let kind = file.artifact_kind;
            let strategy = self
                .strategy_for(kind)
                .ok_or_else(|| anyhow!("No test strategy for {} artifacts", kind))?;

            let ctx = TestContext { analysis, layout: &layout, plan, target: kind, content: &file.content };
            let suite = strategy
                .generate(&ctx)
                .with_context(|| format!("Failed to build tests for {}", file.display_path()))?;
            debug!("{} scenarios for {}", suite.tests.len(), file.display_path());

            let content = self.adapter.generate_test_file(&suite)?;
            tests.push(GeneratedFile::new(ctx.test_path(), content, ArtifactKind::Test, None));
        }

        info!("Generated {} {} test files for {}", tests.len(), self.framework_name(), layout.name());
        Ok(tests)
    }
}

impl Default for TestSynthesizer {
    fn default() -> Self {
        Self::new(Box::new(VitestAdapter::new()))
    }
}
