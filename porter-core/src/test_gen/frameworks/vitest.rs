//! Vitest framework adapter - generates vitest test modules

use super::{TestFrameworkAdapter, codegen};
use crate::synthesis::CodeBuilder;
use crate::test_gen::{TestCase, TestSuite};
use crate::text;
use anyhow::{Result, bail};

/// Globals imported from `vitest` when the module uses them
const VITEST_NAMES: &[&str] = &["describe", "it", "expect", "expectTypeOf", "vi", "beforeEach", "afterEach"];

/// Adapter for generating vitest test code
#[derive(Debug, Default, Clone, Copy)]
pub struct VitestAdapter;

impl VitestAdapter {
    pub fn new() -> Self {
        Self
    }

    fn test_header(test: &TestCase) -> String {
        let asyncness = if test.is_async { "async " } else { "" };
        let name = codegen::test_name(&test.name);
        match &test.each {
            Some((table, param)) => format!("it.each({table})('{name}', {asyncness}({param}) => {{"),
            None => format!("it('{name}', {asyncness}() => {{"),
        }
    }
}

impl TestFrameworkAdapter for VitestAdapter {
    fn generate_test_file(&self, suite: &TestSuite) -> Result<String> {
        if suite.tests.is_empty() {
            bail!("test suite '{}' has no test cases", suite.name);
        }

        let mut suite_body = CodeBuilder::new();
        suite_body.block(format!("describe('{}', () => {{", codegen::test_name(&suite.name)), "});", |b| {
            if !suite.setup.is_empty() {
                b.block("beforeEach(() => {", "});", |b| {
                    for line in &suite.setup {
                        b.lines(line);
                    }
                });
                b.blank();
            }
            if !suite.teardown.is_empty() {
                b.block("afterEach(() => {", "});", |b| {
                    for line in &suite.teardown {
                        b.lines(line);
                    }
                });
                b.blank();
            }
            for test in &suite.tests {
                b.block(Self::test_header(test), "});", |b| {
                    for line in &test.body {
                        b.line(line);
                    }
                });
                b.blank();
            }
        });
        let suite_code = suite_body.build();

        let preamble = suite.preamble.join("\n\n");
        let used = format!("{preamble}\n{suite_code}");
        let globals: Vec<&str> = VITEST_NAMES
            .iter()
            .copied()
            .filter(|name| text::count_word(&used, name) > 0)
            .collect();

        let mut code = CodeBuilder::new();
        code.line(format!("import {{ {} }} from 'vitest';", globals.join(", ")));
        for import in &suite.imports {
            code.line(import);
        }
        code.blank();
        for block in &suite.preamble {
            code.lines(block);
            code.blank();
        }
        code.lines(&suite_code);

        Ok(code.build())
    }

    fn framework_name(&self) -> &str {
        "vitest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::ArtifactKind;
    use crate::test_gen::ScenarioKind;

    #[test]
    fn test_renders_suite() {
        let mut suite = TestSuite::new("Badge", ArtifactKind::Component);
        suite.add_import("import { render } from '@testing-library/react';");
        suite.add_import("import Badge from '../Badge';");
        suite.setup.push("vi.clearAllMocks();".to_string());
        suite.add_test(
            TestCase::new("renders without crashing", ScenarioKind::Render)
                .line("const { container } = render(<Badge />);")
                .line("expect(container.firstChild).toBeTruthy();"),
        );
        suite.add_test(
            TestCase::new("renders at a %ipx wide viewport", ScenarioKind::Responsive)
                .each("[375, 1280]", "width")
                .line("expect(width).toBeGreaterThan(0);"),
        );

        let code = VitestAdapter::new().generate_test_file(&suite).unwrap();
        assert_eq!(
            code,
            "import { describe, it, expect, vi, beforeEach } from 'vitest';\n\
             import { render } from '@testing-library/react';\n\
             import Badge from '../Badge';\n\
             \n\
             describe('Badge', () => {\n\
             \x20 beforeEach(() => {\n\
             \x20   vi.clearAllMocks();\n\
             \x20 });\n\
             \n\
             \x20 it('renders without crashing', () => {\n\
             \x20   const { container } = render(<Badge />);\n\
             \x20   expect(container.firstChild).toBeTruthy();\n\
             \x20 });\n\
             \n\
             \x20 it.each([375, 1280])('renders at a %ipx wide viewport', (width) => {\n\
             \x20   expect(width).toBeGreaterThan(0);\n\
             \x20 });\n\
             });\n"
        );
    }

    #[test]
    fn test_empty_suite_is_rejected() {
        let suite = TestSuite::new("Empty", ArtifactKind::Component);
        assert!(VitestAdapter::new().generate_test_file(&suite).is_err());
    }
}
