//! Pattern extraction over component source
//!
//! Produces a [`ComponentAnalysis`]: the structural facts about one
//! component (name, props, state, effects, idiom flags) that every later
//! stage reads. Extraction is heuristic and advisory; it never fails, it
//! degrades to a best-effort result plus diagnostics.

pub mod extractor;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use extractor::PatternExtractor;
pub use vocabulary::resolve_tier;

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Name used when no component name can be resolved.
pub const UNKNOWN_COMPONENT: &str = "UnknownComponent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Functional,
    StatefulClass,
}

/// Coarse granularity of a component; drives output location and default styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralTier {
    Leaf,
    Composite,
    Assembly,
}

impl StructuralTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Composite => "composite",
            Self::Assembly => "assembly",
        }
    }
}

impl fmt::Display for StructuralTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Default,
    Named,
    Namespace,
    SideEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBinding {
    /// Specifier as written, e.g. `useState` or `Link as RouterLink`
    pub name: String,
    pub origin: String,
    pub binding_kind: BindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropSpec {
    pub name: String,
    pub inferred_type: String,
    pub required: bool,
    pub default_expr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBinding {
    pub name: String,
    /// Setter as declared; class state has none
    pub setter: Option<String>,
    pub inferred_type: String,
    pub initial_expr: String,
}

impl StateBinding {
    /// The declared setter, or the conventional `setName`.
    pub fn setter_name(&self) -> String {
        self.setter
            .clone()
            .unwrap_or_else(|| format!("set{}", crate::text::to_pascal_case(&self.name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Effect,
    LayoutEffect,
    Memo,
    Callback,
    Mount,
    Update,
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectPrimitive {
    pub kind: EffectKind,
    pub dependencies: Vec<String>,
    /// Callback or lifecycle body, when it could be delimited
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub uses_navigation: bool,
    pub uses_media: bool,
    pub uses_animation: bool,
    pub uses_remote_data: bool,
}

/// An event handler declared on a class component, already in arrow form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDecl {
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    Low,
    Medium,
    High,
}

impl ComplexityClass {
    pub fn from_score(score: f64) -> Self {
        if score < 5.0 {
            Self::Low
        } else if score < 15.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// How the component name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    Declared,
    Declaration,
    Export,
    Fallback,
}

/// Structural facts about one component.
///
/// Produced once by the extractor and read-only afterwards. The complexity
/// class is derived on demand from the other fields, so it cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    pub component_name: String,
    pub name_source: NameSource,
    pub component_kind: ComponentKind,
    pub structural_tier: StructuralTier,
    pub imports: Vec<ImportBinding>,
    pub props: Vec<PropSpec>,
    /// Parameter name when props arrive as a single object (`props`)
    pub props_alias: Option<String>,
    pub state_bindings: Vec<StateBinding>,
    pub effect_primitives: Vec<EffectPrimitive>,
    pub feature_flags: FeatureFlags,
    pub style_tokens: BTreeSet<String>,
    pub endpoints: Vec<String>,
    pub handlers: Vec<HandlerDecl>,
    /// JSX returned by the component (or its `render()`), without the outer parens
    pub render_markup: Option<String>,
    /// Statements of the component body, final return excluded
    pub body_statements: Option<String>,
    pub diagnostics: Diagnostics,
}

impl ComponentAnalysis {
    /// A bare functional component with no detected facts.
    pub fn new(component_name: impl Into<String>) -> Self {
        let component_name = component_name.into();
        let structural_tier = resolve_tier(&component_name);
        Self {
            component_name,
            name_source: NameSource::Declared,
            component_kind: ComponentKind::Functional,
            structural_tier,
            imports: Vec::new(),
            props: Vec::new(),
            props_alias: None,
            state_bindings: Vec::new(),
            effect_primitives: Vec::new(),
            feature_flags: FeatureFlags::default(),
            style_tokens: BTreeSet::new(),
            endpoints: Vec::new(),
            handlers: Vec::new(),
            render_markup: None,
            body_statements: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn complexity_score(&self) -> f64 {
        let flags = &self.feature_flags;
        let mut score = self.props.len() as f64
            + self.state_bindings.len() as f64 * 2.0
            + self.effect_primitives.len() as f64 * 1.5;
        if flags.uses_navigation {
            score += 2.0;
        }
        if flags.uses_media {
            score += 1.0;
        }
        if flags.uses_animation {
            score += 3.0;
        }
        if flags.uses_remote_data {
            score += 4.0;
        }
        score
    }

    pub fn complexity_class(&self) -> ComplexityClass {
        ComplexityClass::from_score(self.complexity_score())
    }

    pub fn is_class_component(&self) -> bool {
        self.component_kind == ComponentKind::StatefulClass
    }
}

/// Analyze component source with the default extractor.
pub fn analyze(source: &str, declared_name: Option<&str>) -> ComponentAnalysis {
    PatternExtractor::new().analyze(source, declared_name)
}
