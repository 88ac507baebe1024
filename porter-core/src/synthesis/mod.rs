//! Artifact synthesis
//!
//! Turns a [`ComponentAnalysis`](crate::analysis::ComponentAnalysis) into
//! the target project's artifacts: the component, its types, a data hook,
//! an API client service and a state store. Each artifact kind is a
//! template registered on the [`ArtifactSynthesizer`].

pub mod builder;
pub mod generator;
pub mod layout;
pub mod rewrite;
pub mod styles;
pub mod templates;

pub use builder::CodeBuilder;
pub use generator::{ArtifactPlan, ArtifactSynthesizer};
pub use layout::ArtifactLayout;

use crate::analysis::StructuralTier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Missing template input: {0}")]
    MissingInput(String),

    #[error("Invalid component name: {0:?}")]
    InvalidName(String),

    #[error("Duplicate output path: {0}")]
    DuplicatePath(String),
}

pub type Result<T> = std::result::Result<T, SynthesisError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Component,
    Types,
    Hook,
    Service,
    Store,
    Test,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Types => "types",
            Self::Hook => "hook",
            Self::Service => "service",
            Self::Store => "store",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated source file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub relative_path: PathBuf,
    pub content: String,
    pub artifact_kind: ArtifactKind,
    pub structural_tier: Option<StructuralTier>,
}

impl GeneratedFile {
    pub fn new(
        relative_path: impl Into<PathBuf>,
        content: impl Into<String>,
        artifact_kind: ArtifactKind,
        structural_tier: Option<StructuralTier>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
            artifact_kind,
            structural_tier,
        }
    }

    pub fn is_test(&self) -> bool {
        self.artifact_kind == ArtifactKind::Test
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Path with forward slashes, stable across platforms
    pub fn display_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}
