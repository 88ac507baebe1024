//! Test generation strategies, one per artifact kind

pub mod component;
pub mod hook;
pub mod service;
pub mod store;
pub mod types;

pub use component::ComponentStrategy;
pub use hook::HookStrategy;
pub use service::ServiceStrategy;
pub use store::StoreStrategy;
pub use types::TypesStrategy;

use crate::analysis::{ComponentAnalysis, StateBinding};
use crate::synthesis::{ArtifactKind, ArtifactLayout, ArtifactPlan};
use crate::test_gen::TestSuite;
use anyhow::Result;
use std::path::PathBuf;

/// Trait for test generation strategies
pub trait TestStrategy: Send + Sync {
    /// Artifact kind this strategy tests
    fn target(&self) -> ArtifactKind;

    /// Build the suite for the artifact in `context`
    fn generate(&self, context: &TestContext<'_>) -> Result<TestSuite>;
}

/// Context for test generation
pub struct TestContext<'a> {
    pub analysis: &'a ComponentAnalysis,
    pub layout: &'a ArtifactLayout,
    /// Artifacts generated alongside the target
    pub plan: ArtifactPlan,
    pub target: ArtifactKind,
    /// Generated source of the target artifact
    pub content: &'a str,
}

impl TestContext<'_> {
    pub fn test_path(&self) -> PathBuf {
        self.layout.test_path_for(self.target)
    }

    /// Import specifier from the test module to an artifact
    pub fn import_path(&self, kind: ArtifactKind) -> String {
        ArtifactLayout::import_path(&self.test_path(), &self.layout.path_for(kind))
    }

    /// Whether the component reads its data through the generated hook
    pub fn uses_query(&self) -> bool {
        self.plan.hook && self.analysis.feature_flags.uses_remote_data
    }
}

/// Where a sample value is written: JSX test modules can mock callbacks,
/// type-level tests only need a value of the right type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSite {
    Component,
    TypeCheck,
}

/// A literal of type `ty` for the binding `name`
pub fn sample_value(ty: &str, name: &str, site: SampleSite) -> String {
    match ty {
        "boolean" => "true".to_string(),
        "number" => "1".to_string(),
        "string" | "unknown" => format!("'{name} value'"),
        "() => void" if site == SampleSite::Component => "vi.fn()".to_string(),
        "() => void" => "() => {}".to_string(),
        "ReactNode" => "'content'".to_string(),
        "ReactElement" if site == SampleSite::Component => "<span />".to_string(),
        "ReactElement" => "createElement('span')".to_string(),
        "Date" => "new Date(0)".to_string(),
        "symbol" => format!("Symbol('{name}')"),
        ty if ty.ends_with("[]") => "[]".to_string(),
        ty if ty.starts_with("Record<") => "{}".to_string(),
        _ => format!("'{name} value'"),
    }
}

/// A value for `state` different from its initial one
pub fn updated_value(state: &StateBinding) -> String {
    match state.inferred_type.as_str() {
        "boolean" if state.initial_expr.trim() == "true" => "false".to_string(),
        "boolean" => "true".to_string(),
        "number" => "42".to_string(),
        ty if ty.ends_with("[]") => "[{ id: 1 }]".to_string(),
        ty if ty.starts_with("Record<") => "{ key: 'value' }".to_string(),
        _ => "'updated'".to_string(),
    }
}
