//! Core functionality for porter
//!
//! Converts a single Create React App component into the artifacts a Vite +
//! React + TypeScript project expects: the component, its types, a data
//! hook, an API service, a state store and a vitest suite for each. The
//! stages live in their own modules and are sequenced by
//! [`pipeline::PipelineCoordinator`].

pub mod analysis;
pub mod build;
pub mod diagnostics;
pub mod optimize;
pub mod pipeline;
pub mod synthesis;
pub mod test_gen;
pub mod text;

pub use analysis::{ComponentAnalysis, analyze};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use pipeline::{ConversionConfig, ConversionResult, PipelineCoordinator, convert};
pub use synthesis::{ArtifactKind, GeneratedFile};
