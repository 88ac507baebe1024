//! Diagnostics accumulated across the conversion pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic, mirroring where in the pipeline it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Heuristic mismatch during analysis; never fatal
    AnalysisWarning,
    /// The source cannot be converted as a unit
    AnalysisError,
    /// A template could not be rendered or persisted
    GenerationError,
    /// An optimization pass was skipped
    OptimizationWarning,
    /// The target project's tooling failed or could not start
    BuildError,
}

impl DiagnosticKind {
    pub fn is_error(self) -> bool {
        matches!(self, Self::AnalysisError | Self::GenerationError | Self::BuildError)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AnalysisWarning => "analysis warning",
            Self::AnalysisError => "analysis error",
            Self::GenerationError => "generation error",
            Self::OptimizationWarning => "optimization warning",
            Self::BuildError => "build error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Errors and warnings, kept apart so `success` is a simple emptiness check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a diagnostic to `errors` or `warnings` by its kind
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind.is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic::new(kind, message));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.errors.iter().chain(&self.warnings).filter(|d| d.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_by_kind() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(DiagnosticKind::AnalysisWarning, "unused prop"));
        diagnostics.push(Diagnostic::new(DiagnosticKind::BuildError, "vitest failed"));
        diagnostics.record(DiagnosticKind::OptimizationWarning, "pass skipped");

        assert_eq!(diagnostics.errors.len(), 1);
        assert_eq!(diagnostics.warnings.len(), 2);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.count(DiagnosticKind::OptimizationWarning), 1);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(DiagnosticKind::AnalysisError, "no component declaration found");
        assert_eq!(diagnostic.to_string(), "analysis error: no component declaration found");
    }
}
