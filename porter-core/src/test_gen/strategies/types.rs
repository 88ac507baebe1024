//! Type-level tests for `<Name>.types.ts`

use super::{SampleSite, TestContext, TestStrategy, sample_value};
use crate::analysis::PropSpec;
use crate::synthesis::ArtifactKind;
use crate::test_gen::{ScenarioKind, TestCase, TestSuite};
use anyhow::Result;

pub struct TypesStrategy;

fn object_literal<'a>(
    binding: &str,
    ty: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut code = format!("const {binding}: {ty} = {{\n");
    for (name, inferred) in entries {
        code.push_str(&format!("  {name}: {},\n", sample_value(inferred, name, SampleSite::TypeCheck)));
    }
    code.push_str("};");
    code
}

fn prop_entries<'a>(props: impl Iterator<Item = &'a PropSpec>) -> impl Iterator<Item = (&'a str, &'a str)> {
    props.map(|p| (p.name.as_str(), p.inferred_type.as_str()))
}

impl TestStrategy for TypesStrategy {
    fn target(&self) -> ArtifactKind {
        ArtifactKind::Types
    }

    fn generate(&self, ctx: &TestContext<'_>) -> Result<TestSuite> {
        let analysis = ctx.analysis;
        let layout = ctx.layout;
        let declares_data = analysis.feature_flags.uses_remote_data || ctx.plan.hook;

        let mut names = Vec::new();
        if !analysis.props.is_empty() {
            names.push(layout.props_type());
        }
        if !analysis.state_bindings.is_empty() {
            names.push(layout.state_type());
        }
        if declares_data {
            names.push(layout.data_type());
        }

        let mut suite = TestSuite::new(format!("{} types", layout.name()), ArtifactKind::Types);
        if analysis.props.iter().any(|p| p.inferred_type == "ReactElement") {
            suite.add_import("import { createElement } from 'react';");
        }
        if !names.is_empty() {
            suite.add_import(format!(
                "import type {{ {} }} from '{}';",
                names.join(", "),
                ctx.import_path(ArtifactKind::Types)
            ));
        }

        if !analysis.props.is_empty() {
            let props_type = layout.props_type();
            suite.add_test(
                TestCase::new("accepts a complete props object", ScenarioKind::Prop)
                    .line(object_literal("props", &props_type, prop_entries(analysis.props.iter())))
                    .line(format!("expectTypeOf(props).toEqualTypeOf<{props_type}>();")),
            );
            if analysis.props.iter().any(|p| !p.required) {
                suite.add_test(
                    TestCase::new("allows optional props to be omitted", ScenarioKind::Prop)
                        .line(object_literal(
                            "props",
                            &props_type,
                            prop_entries(analysis.props.iter().filter(|p| p.required)),
                        ))
                        .line(format!("expectTypeOf(props).toEqualTypeOf<{props_type}>();")),
                );
            }
        }

        if !analysis.state_bindings.is_empty() {
            let state_type = layout.state_type();
            let entries = analysis.state_bindings.iter().map(|s| (s.name.as_str(), s.inferred_type.as_str()));
            suite.add_test(
                TestCase::new("describes every state binding", ScenarioKind::State)
                    .line(object_literal("state", &state_type, entries))
                    .line(format!("expectTypeOf(state).toEqualTypeOf<{state_type}>();")),
            );
        }

        if declares_data {
            suite.add_test(
                TestCase::new("declares the remote data type", ScenarioKind::Data)
                    .line(format!("expectTypeOf<{}>().toBeUnknown();", layout.data_type())),
            );
        }

        Ok(suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactLayout, ArtifactPlan};

    #[test]
    fn test_types_scenarios() {
        let source = "const Chip = ({ label, onRemove, isActive = false }) => <span onClick={onRemove}>{label}{String(isActive)}</span>;";
        let analysis = analyze(source, None);
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let content = "export interface ChipProps {\n  label: unknown;\n}\n";
        let ctx = TestContext {
            analysis: &analysis,
            layout: &layout,
            plan: ArtifactPlan { types: true, ..ArtifactPlan::default() },
            target: ArtifactKind::Types,
            content,
        };
        let suite = TypesStrategy.generate(&ctx).unwrap();

        assert_eq!(suite.imports, vec!["import type { ChipProps } from '../Chip.types';"]);
        assert_eq!(suite.count(ScenarioKind::Prop), 2);
        let optional = &suite.tests[1];
        assert_eq!(
            optional.body,
            vec![
                "const props: ChipProps = {",
                "  label: 'label value',",
                "  onRemove: () => {},",
                "};",
                "expectTypeOf(props).toEqualTypeOf<ChipProps>();",
            ]
        );
    }
}
