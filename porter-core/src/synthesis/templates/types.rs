//! `<Name>.types.ts`: props, state and remote data declarations

use super::{ArtifactTemplate, RenderContext};
use crate::analysis::ComponentAnalysis;
use crate::pipeline::ConversionConfig;
use crate::synthesis::{ArtifactKind, CodeBuilder, Result};

pub struct TypesTemplate;

/// Whether the types module declares `<Name>Data`
pub(crate) fn declares_data(ctx: &RenderContext<'_>) -> bool {
    ctx.analysis.feature_flags.uses_remote_data || ctx.plan.hook
}

impl ArtifactTemplate for TypesTemplate {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Types
    }

    fn applies(&self, analysis: &ComponentAnalysis, config: &ConversionConfig) -> bool {
        config.generate_types
            && (!analysis.props.is_empty()
                || !analysis.state_bindings.is_empty()
                || analysis.feature_flags.uses_remote_data)
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let analysis = ctx.analysis;
        let mut code = CodeBuilder::new();

        let react_types: Vec<&str> = ["ReactElement", "ReactNode"]
            .into_iter()
            .filter(|ty| analysis.props.iter().any(|p| p.inferred_type == *ty))
            .collect();
        if !react_types.is_empty() {
            code.line(format!("import type {{ {} }} from 'react';", react_types.join(", "))).blank();
        }

        if !analysis.props.is_empty() {
            code.block(format!("export interface {} {{", ctx.layout.props_type()), "}", |b| {
                for prop in &analysis.props {
                    let optional = if prop.required { "" } else { "?" };
                    b.line(format!("{}{}: {};", prop.name, optional, prop.inferred_type));
                }
            });
            code.blank();
        }

        if !analysis.state_bindings.is_empty() {
            code.block(format!("export interface {} {{", ctx.layout.state_type()), "}", |b| {
                for state in &analysis.state_bindings {
                    b.line(format!("{}: {};", state.name, state.inferred_type));
                }
            });
            code.blank();
        }

        if declares_data(ctx) {
            code.line(format!("export type {} = unknown;", ctx.layout.data_type()));
        }

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactKind, ArtifactSynthesizer};

    #[test]
    fn test_props_interface() {
        let source = r#"
const Chip = ({ label, onRemove, isActive = false, children }) => (
  <span onClick={onRemove} data-active={isActive}>{label}{children}</span>
);
"#;
        let analysis = analyze(source, None);
        let files = ArtifactSynthesizer::default().generate(&analysis).unwrap();
        let types = files.iter().find(|f| f.artifact_kind == ArtifactKind::Types).unwrap();

        assert_eq!(
            types.content,
            "import type { ReactNode } from 'react';\n\n\
             export interface ChipProps {\n  label: unknown;\n  onRemove: () => void;\n  isActive?: boolean;\n  children: ReactNode;\n}\n"
        );
    }
}
