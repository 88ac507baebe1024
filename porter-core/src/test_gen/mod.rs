//! Test synthesis for generated artifacts
//!
//! Every non-test artifact gets one test module. A strategy per artifact
//! kind builds a framework-neutral [`TestSuite`]; a framework adapter
//! renders it to source text. Nothing here executes the tests.

pub mod frameworks;
pub mod generator;
pub mod strategies;

use crate::synthesis::ArtifactKind;
use serde::{Deserialize, Serialize};

pub use frameworks::{TestFrameworkAdapter, VitestAdapter};
pub use generator::TestSynthesizer;
pub use strategies::{TestContext, TestStrategy};

/// What a test case exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Render,
    Prop,
    Loading,
    Error,
    Data,
    Navigation,
    State,
    Accessibility,
    Responsive,
    Rerender,
    Retry,
    Shape,
}

/// One test module's worth of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub target: ArtifactKind,
    /// Import declarations, in order
    pub imports: Vec<String>,
    /// Module level code between the imports and the suite: mocks, fixtures, helpers
    pub preamble: Vec<String>,
    pub setup: Vec<String>,
    pub teardown: Vec<String>,
    pub tests: Vec<TestCase>,
}

/// Individual test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub kind: ScenarioKind,
    pub is_async: bool,
    /// Parameter table and parameter name for a table driven case
    pub each: Option<(String, String)>,
    pub body: Vec<String>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>, target: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            target,
            imports: Vec::new(),
            preamble: Vec::new(),
            setup: Vec::new(),
            teardown: Vec::new(),
            tests: Vec::new(),
        }
    }

    pub fn add_import(&mut self, import: impl Into<String>) {
        let import = import.into();
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    /// A block of module level code; blocks are separated by a blank line
    pub fn add_preamble(&mut self, block: impl Into<String>) {
        self.preamble.push(block.into());
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    pub fn count(&self, kind: ScenarioKind) -> usize {
        self.tests.iter().filter(|t| t.kind == kind).count()
    }
}

impl TestCase {
    pub fn new(name: impl Into<String>, kind: ScenarioKind) -> Self {
        Self { name: name.into(), kind, is_async: false, each: None, body: Vec::new() }
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn each(mut self, table: impl Into<String>, param: impl Into<String>) -> Self {
        self.each = Some((table.into(), param.into()));
        self
    }

    /// Append body code; multi-line blocks keep their relative indentation
    pub fn line(mut self, code: impl AsRef<str>) -> Self {
        self.body.extend(code.as_ref().lines().map(str::to_string));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_creation() {
        let mut suite = TestSuite::new("Badge", ArtifactKind::Component);
        assert_eq!(suite.name, "Badge");
        assert!(suite.tests.is_empty());

        suite.add_import("import Badge from '../Badge';");
        suite.add_import("import Badge from '../Badge';");
        assert_eq!(suite.imports.len(), 1);

        suite.add_test(TestCase::new("renders without crashing", ScenarioKind::Render));
        suite.add_test(TestCase::new("renders with the label prop", ScenarioKind::Prop));
        assert_eq!(suite.count(ScenarioKind::Prop), 1);
    }

    #[test]
    fn test_case_builder() {
        let test = TestCase::new("renders at each width", ScenarioKind::Responsive)
            .each("[375, 768]", "width")
            .line("const { container } = renderComponent();\nexpect(container.firstChild).toBeTruthy();");
        assert_eq!(test.body.len(), 2);
        assert_eq!(test.each, Some(("[375, 768]".to_string(), "width".to_string())));
        assert!(!test.is_async);
    }
}
