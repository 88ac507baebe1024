//! Test framework adapters for rendering suites to framework-specific code

pub mod vitest;

pub use vitest::VitestAdapter;

use crate::test_gen::TestSuite;
use anyhow::Result;

/// Trait for test framework adapters
pub trait TestFrameworkAdapter: Send + Sync {
    /// Generate test file content from a test suite
    fn generate_test_file(&self, suite: &TestSuite) -> Result<String>;

    /// Get the framework name
    fn framework_name(&self) -> &str;
}

/// Helper functions for code generation
pub mod codegen {
    /// Escape text for a single-quoted test name
    pub fn test_name(s: &str) -> String {
        s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codegen_helpers() {
        assert_eq!(codegen::test_name("renders the user's name"), "renders the user\\'s name");
        assert_eq!(codegen::test_name("two\nlines"), "two lines");
    }
}
