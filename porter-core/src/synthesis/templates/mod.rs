//! Artifact templates, one per artifact kind

pub mod component;
pub mod hook;
pub mod service;
pub mod store;
pub mod types;

pub use component::ComponentTemplate;
pub use hook::HookTemplate;
pub use service::ServiceTemplate;
pub use store::StoreTemplate;
pub use types::TypesTemplate;

use super::{ArtifactKind, ArtifactLayout, ArtifactPlan, Result};
use crate::analysis::ComponentAnalysis;
use crate::pipeline::ConversionConfig;
use crate::text;
use std::path::PathBuf;

/// Inputs shared by every template for one component.
pub struct RenderContext<'a> {
    pub analysis: &'a ComponentAnalysis,
    pub layout: &'a ArtifactLayout,
    /// Which artifacts are emitted alongside this one
    pub plan: &'a ArtifactPlan,
}

impl RenderContext<'_> {
    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.layout.path_for(kind)
    }

    /// Import specifier from artifact `from` to artifact `to`
    pub fn import_path(&self, from: ArtifactKind, to: ArtifactKind) -> String {
        ArtifactLayout::import_path(&self.path(from), &self.path(to))
    }
}

/// A template producing one artifact kind.
///
/// `applies` decides whether the artifact is emitted at all; the result is
/// collected into the [`ArtifactPlan`] before any template renders, so
/// templates can refer to their siblings.
pub trait ArtifactTemplate: Send + Sync {
    fn kind(&self) -> ArtifactKind;

    fn applies(&self, analysis: &ComponentAnalysis, config: &ConversionConfig) -> bool;

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String>;
}

const REACT_NAMED: &[&str] = &[
    "Fragment",
    "forwardRef",
    "memo",
    "useCallback",
    "useContext",
    "useEffect",
    "useLayoutEffect",
    "useMemo",
    "useReducer",
    "useRef",
    "useState",
];

/// The `react` import a module needs, derived from the code it contains.
pub(crate) fn react_import(code: &str) -> Option<String> {
    let named: Vec<&str> = REACT_NAMED
        .iter()
        .copied()
        .filter(|name| text::count_word(code, name) > code.matches(&format!("React.{name}")).count())
        .collect();
    let needs_default = code.contains("React.");
    match (needs_default, named.is_empty()) {
        (false, true) => None,
        (true, true) => Some("import React from 'react';".to_string()),
        (false, false) => Some(format!("import {{ {} }} from 'react';", named.join(", "))),
        (true, false) => Some(format!("import React, {{ {} }} from 'react';", named.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_import() {
        assert_eq!(react_import("<div />"), None);
        assert_eq!(
            react_import("const [a, setA] = useState(0);\nuseEffect(() => {}, []);"),
            Some("import { useEffect, useState } from 'react';".to_string())
        );
        assert_eq!(
            react_import("const r = React.useRef(null);"),
            Some("import React from 'react';".to_string())
        );
    }
}
