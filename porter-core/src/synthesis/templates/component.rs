//! `<Name>.tsx`: the component ported to a typed function component
//!
//! Class components are rebuilt from their parts: state becomes
//! `useState` (or the generated store), lifecycle methods become effects,
//! handlers become `const` arrows. When a data hook is generated, the
//! effects that fetched data are replaced by the hook and the state they
//! filled is derived from the query instead.

use super::{ArtifactTemplate, RenderContext, react_import};
use crate::analysis::{ComponentAnalysis, EffectKind, PropSpec, StateBinding, StructuralTier};
use crate::pipeline::ConversionConfig;
use crate::synthesis::rewrite::{self, port_code, port_imports};
use crate::synthesis::{ArtifactKind, CodeBuilder, Result};
use crate::text;
use regex_utils::component as patterns;

pub struct ComponentTemplate;

const MAX_SIGNATURE_WIDTH: usize = 80;

/// State types simple enough to annotate on `useState`
const ANNOTATED_TYPES: &[&str] = &["boolean", "number", "string"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum UnitKind {
    /// `useState` declaration of the named binding
    State(String),
    Effect,
    Other,
}

/// One top-level statement of the generated component body.
#[derive(Debug, Clone)]
struct Unit {
    kind: UnitKind,
    code: String,
}

impl Unit {
    fn new(kind: UnitKind, code: impl Into<String>) -> Self {
        Self { kind, code: code.into() }
    }

    fn declares(&self, name: &str) -> bool {
        matches!(&self.kind, UnitKind::State(state) if state == name)
    }
}

fn classify(statement: &str) -> UnitKind {
    if let Some(caps) = patterns::USE_STATE.captures(statement) {
        if caps.get(0).is_some_and(|m| m.start() == 0) {
            return UnitKind::State(caps[1].to_string());
        }
    }
    let head = statement.strip_prefix("React.").unwrap_or(statement);
    if head.starts_with("useEffect") || head.starts_with("useLayoutEffect") {
        UnitKind::Effect
    } else {
        UnitKind::Other
    }
}

fn state_generic(state: &StateBinding) -> String {
    if ANNOTATED_TYPES.contains(&state.inferred_type.as_str()) {
        format!("<{}>", state.inferred_type)
    } else {
        String::new()
    }
}

fn state_declaration(state: &StateBinding) -> String {
    format!(
        "const [{}, {}] = useState{}({});",
        state.name,
        state.setter_name(),
        state_generic(state),
        state.initial_expr.trim()
    )
}

/// Body units of a function component, statement by statement.
fn functional_units(analysis: &ComponentAnalysis) -> Vec<Unit> {
    let Some(body) = &analysis.body_statements else {
        return Vec::new();
    };
    rewrite::statements(body)
        .into_iter()
        .map(|statement| {
            let kind = classify(&statement);
            let code = match &kind {
                UnitKind::State(name) => annotate_state(&statement, analysis, name),
                _ => statement,
            };
            Unit::new(kind, code)
        })
        .collect()
}

/// Add a type argument to an untyped `useState(` call
fn annotate_state(statement: &str, analysis: &ComponentAnalysis, name: &str) -> String {
    let Some(state) = analysis.state_bindings.iter().find(|s| s.name == name) else {
        return statement.to_string();
    };
    let generic = state_generic(state);
    if generic.is_empty() || !statement.contains("useState(") {
        return statement.to_string();
    }
    statement.replacen("useState(", &format!("useState{generic}("), 1)
}

/// Body units rebuilt from a class component's state, lifecycle methods,
/// handlers and render statements.
fn class_units(analysis: &ComponentAnalysis) -> Vec<Unit> {
    let mut units: Vec<Unit> = analysis
        .state_bindings
        .iter()
        .map(|state| Unit::new(UnitKind::State(state.name.clone()), state_declaration(state)))
        .collect();

    let bodies = |kind: EffectKind| -> Vec<&str> {
        analysis
            .effect_primitives
            .iter()
            .filter(|effect| effect.kind == kind)
            .filter_map(|effect| effect.body.as_deref())
            .filter(|body| !body.trim().is_empty())
            .collect()
    };
    let mount = bodies(EffectKind::Mount);
    let unmount = bodies(EffectKind::Unmount);
    let update = bodies(EffectKind::Update);

    if !mount.is_empty() || !unmount.is_empty() {
        let mut effect = CodeBuilder::new();
        effect.open("useEffect(() => {");
        for body in &mount {
            effect.lines(body);
        }
        if !unmount.is_empty() {
            effect.block("return () => {", "};", |b| {
                for body in &unmount {
                    b.lines(body);
                }
            });
        }
        effect.close("}, []);");
        units.push(Unit::new(UnitKind::Effect, effect.build().trim_end()));
    }
    for body in update {
        let mut effect = CodeBuilder::new();
        effect.block("useEffect(() => {", "});", |b| {
            b.lines(body);
        });
        units.push(Unit::new(UnitKind::Effect, effect.build().trim_end()));
    }

    units.extend(analysis.handlers.iter().map(|handler| Unit::new(UnitKind::Other, handler.source.clone())));
    if let Some(body) = &analysis.body_statements {
        units.extend(rewrite::statements(body).into_iter().map(|s| Unit::new(UnitKind::Other, s)));
    }
    units
}

/// Replace data fetching effects with the generated hook.
///
/// Removes effects that reach a remote source, then derives each state
/// binding that only those effects wrote: loading flags from
/// `query.isLoading`, errors from `query.error`, the first remaining one
/// from `query.data`. Returns the derived declarations.
fn replace_fetching(units: &mut Vec<Unit>, markup: &str, analysis: &ComponentAnalysis) -> Vec<(String, String)> {
    let (removed, kept): (Vec<Unit>, Vec<Unit>) = units
        .drain(..)
        .partition(|unit| unit.kind == UnitKind::Effect && patterns::REMOTE_DATA.is_match(&unit.code));
    *units = kept;

    let removed_code = removed.iter().map(|u| u.code.as_str()).collect::<Vec<_>>().join("\n");
    let mut derived = Vec::new();
    let mut data_taken = false;

    for state in &analysis.state_bindings {
        let setter = state.setter_name();
        if text::count_word(&removed_code, &setter) == 0 {
            continue;
        }
        let written_elsewhere = text::count_word(markup, &setter) > 0
            || units
                .iter()
                .filter(|unit| !unit.declares(&state.name))
                .any(|unit| text::count_word(&unit.code, &setter) > 0);
        if written_elsewhere {
            continue;
        }

        let lowered = state.name.to_ascii_lowercase();
        let expr = if state.inferred_type == "boolean"
            && ["loading", "fetching", "pending"].iter().any(|w| lowered.contains(w))
        {
            "query.isLoading".to_string()
        } else if lowered.contains("err") {
            "query.error".to_string()
        } else if !data_taken {
            data_taken = true;
            data_expression(state)
        } else {
            continue;
        };

        units.retain(|unit| !unit.declares(&state.name));
        derived.push((state.name.clone(), format!("const {} = {expr};", state.name)));
    }
    derived
}

fn data_expression(state: &StateBinding) -> String {
    let initial = state.initial_expr.trim();
    let fallback = if matches!(initial, "" | "undefined") {
        "query.data".to_string()
    } else {
        format!("query.data ?? {initial}")
    };
    if state.inferred_type == "unknown" {
        fallback
    } else {
        format!("({fallback}) as {}", state.inferred_type)
    }
}

fn tier_classes(tier: StructuralTier) -> &'static str {
    match tier {
        StructuralTier::Leaf => "inline-flex items-center gap-2",
        StructuralTier::Composite => "flex flex-col gap-4 rounded-lg border p-4",
        StructuralTier::Assembly => "min-h-screen flex flex-col gap-6 p-6",
    }
}

/// Markup for a component whose render output could not be recovered
fn placeholder_markup(ctx: &RenderContext<'_>) -> String {
    let layout = ctx.layout;
    let mut markup = CodeBuilder::new();
    markup.block(
        format!(
            "<div data-testid=\"{}\" className=\"{}\">",
            layout.kebab_name(),
            tier_classes(layout.tier())
        ),
        "</div>",
        |b| {
            b.line(layout.name());
            if ctx.analysis.props.iter().any(|p| p.name == "children") {
                b.line("{children}");
            }
        },
    );
    markup.build().trim_end().to_string()
}

fn prop_parameter(prop: &PropSpec) -> String {
    match &prop.default_expr {
        Some(default) => format!("{} = {}", prop.name, default.trim()),
        None => prop.name.clone(),
    }
}

fn props_interface(code: &mut CodeBuilder, ctx: &RenderContext<'_>) {
    code.block(format!("interface {} {{", ctx.layout.props_type()), "}", |b| {
        for prop in &ctx.analysis.props {
            let optional = if prop.required { "" } else { "?" };
            b.line(format!("{}{}: {};", prop.name, optional, prop.inferred_type));
        }
    });
}

impl ComponentTemplate {
    /// `const Name = (...) => {` for the component's props
    fn signature(ctx: &RenderContext<'_>, body: &str) -> Vec<String> {
        let analysis = ctx.analysis;
        let name = ctx.layout.name();
        if analysis.props.is_empty() {
            return vec![format!("const {name} = () => {{")];
        }

        let mut params: Vec<String> = analysis.props.iter().map(prop_parameter).collect();
        if let Some(alias) = &analysis.props_alias {
            if text::count_word(body, alias) > 0 {
                params.push(format!("...{alias}"));
            }
        }
        let props_type = ctx.layout.props_type();
        let single = format!("const {name} = ({{ {} }}: {props_type}) => {{", params.join(", "));
        if single.len() <= MAX_SIGNATURE_WIDTH {
            return vec![single];
        }

        let mut lines = vec![format!("const {name} = ({{")];
        lines.extend(params.iter().map(|param| format!("  {param},")));
        lines.push(format!("}}: {props_type}) => {{"));
        lines
    }

    fn uses_query(ctx: &RenderContext<'_>) -> bool {
        ctx.plan.hook && ctx.analysis.feature_flags.uses_remote_data
    }
}

impl ArtifactTemplate for ComponentTemplate {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Component
    }

    fn applies(&self, _analysis: &ComponentAnalysis, _config: &ConversionConfig) -> bool {
        true
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let analysis = ctx.analysis;
        let layout = ctx.layout;
        let uses_query = Self::uses_query(ctx);

        let markup = match &analysis.render_markup {
            Some(markup) => port_code(markup, analysis),
            None => placeholder_markup(ctx),
        };

        let mut units = if analysis.is_class_component() { class_units(analysis) } else { functional_units(analysis) };
        for unit in &mut units {
            unit.code = port_code(&unit.code, analysis).trim().to_string();
        }
        units.retain(|unit| !unit.code.is_empty());

        let derived = if uses_query { replace_fetching(&mut units, &markup, analysis) } else { Vec::new() };

        let store_names: Vec<String> = if ctx.plan.store {
            analysis
                .state_bindings
                .iter()
                .filter(|state| !derived.iter().any(|(name, _)| *name == state.name))
                .flat_map(|state| [state.name.clone(), state.setter_name()])
                .collect()
        } else {
            Vec::new()
        };
        if ctx.plan.store {
            units.retain(|unit| !matches!(unit.kind, UnitKind::State(_)));
        }

        let unit_code = units.iter().map(|u| u.code.as_str()).collect::<Vec<_>>().join("\n");
        let needs_navigate = (unit_code.contains("navigate(") || markup.contains("navigate("))
            && text::count_word(&unit_code, "useNavigate") == 0;

        let mut body = CodeBuilder::new();
        if needs_navigate {
            body.line("const navigate = useNavigate();");
        }
        if uses_query {
            body.line(format!("const query = {}();", layout.hook_name()));
        }
        if !store_names.is_empty() {
            body.line(format!("const {{ {} }} = {}();", store_names.join(", "), layout.store_hook()));
        }
        for (_, declaration) in &derived {
            body.line(declaration);
        }

        let mut previous_state = false;
        for unit in &units {
            let is_state = matches!(unit.kind, UnitKind::State(_));
            if !(is_state && previous_state) {
                body.blank();
            }
            body.lines(&unit.code);
            previous_state = is_state;
        }

        if uses_query {
            body.blank();
            body.block("if (query.isLoading) {", "}", |b| {
                b.line("return <div role=\"status\">Loading...</div>;");
            });
            body.blank();
            body.block("if (query.error) {", "}", |b| {
                b.line("return <div role=\"alert\">{query.error.message}</div>;");
            });
        }
        body.blank();
        body.block("return (", ");", |b| {
            b.lines(&markup);
        });

        let body_code = body.build();
        let signature = Self::signature(ctx, &body_code);

        let mut function = CodeBuilder::new();
        for line in &signature[..signature.len() - 1] {
            function.line(line);
        }
        function.open(&signature[signature.len() - 1]);
        function.lines(&body_code);
        function.close("};");
        let function_code = function.build();

        let mut imports = port_imports(analysis, text::count_word(&function_code, "axios") == 0);
        if needs_navigate {
            imports.add_named("react-router-dom", "useNavigate");
        }
        if uses_query {
            imports.add_named(&ctx.import_path(ArtifactKind::Component, ArtifactKind::Hook), &layout.hook_name());
        }
        if ctx.plan.store {
            imports.add_named(&ctx.import_path(ArtifactKind::Component, ArtifactKind::Store), &layout.store_hook());
        }
        if !analysis.props.is_empty() {
            if ctx.plan.types {
                imports.add_type(&ctx.import_path(ArtifactKind::Component, ArtifactKind::Types), &layout.props_type());
            } else {
                for react_type in ["ReactElement", "ReactNode"] {
                    if analysis.props.iter().any(|p| p.inferred_type == react_type) {
                        imports.add_type("react", react_type);
                    }
                }
            }
        }

        let mut code = CodeBuilder::new();
        if let Some(react) = react_import(&function_code) {
            code.line(react);
        }
        for line in imports.render() {
            code.line(line);
        }
        code.blank();
        for constant in imports.asset_constants() {
            code.line(constant);
        }
        code.blank();
        if !analysis.props.is_empty() && !ctx.plan.types {
            props_interface(&mut code, ctx);
            code.blank();
        }
        code.lines(&function_code);
        code.blank();
        code.line(format!("export default {};", layout.name()));

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::pipeline::ConversionConfig;
    use crate::synthesis::{ArtifactKind, ArtifactSynthesizer, GeneratedFile};
    use crate::text;

    fn component(files: &[GeneratedFile]) -> &str {
        &files.iter().find(|f| f.artifact_kind == ArtifactKind::Component).unwrap().content
    }

    #[test]
    fn test_minimal_component() {
        let files = ArtifactSynthesizer::default().generate(&analyze("const Divider = () => <hr />;", None)).unwrap();
        assert_eq!(component(&files), "const Divider = () => {\n  return (\n    <hr />\n  );\n};\n\nexport default Divider;\n");
    }

    #[test]
    fn test_class_component_becomes_function() {
        let source = r#"
import React, { Component } from 'react';
import { withRouter, Link } from 'react-router-dom';

class ProfileCard extends Component {
  state = { editing: false, clicks: 0 };

  componentDidMount() {
    document.title = 'Profile';
  }

  componentWillUnmount() {
    document.title = '';
  }

  handleSave = () => {
    this.setState({ editing: false });
    this.props.history.push('/profile');
  };

  render() {
    const { editing } = this.state;
    return (
      <div className="card">
        <Link to="/home">Home</Link>
        <button onClick={this.handleSave} disabled={!editing}>{this.props.label}</button>
      </div>
    );
  }
}

export default withRouter(ProfileCard);
"#;
        let config = ConversionConfig { generate_types: false, ..ConversionConfig::default() };
        let files = ArtifactSynthesizer::new(config).generate(&analyze(source, None)).unwrap();
        let content = component(&files);

        assert!(content.starts_with("import { useEffect, useState } from 'react';\nimport { Link, useNavigate } from 'react-router-dom';\n"), "{content}");
        assert!(content.contains("interface ProfileCardProps {\n  label: unknown;\n}"));
        assert!(content.contains("const ProfileCard = ({ label }: ProfileCardProps) => {"));
        assert!(content.contains("  const navigate = useNavigate();\n"));
        assert!(content.contains("  const [editing, setEditing] = useState<boolean>(false);\n  const [clicks, setClicks] = useState<number>(0);\n"));
        assert!(content.contains("  useEffect(() => {\n    document.title = 'Profile';\n    return () => {\n      document.title = '';\n    };\n  }, []);\n"));
        assert!(content.contains("  const handleSave = () => {\n    setEditing(false);\n    navigate('/profile');\n  };\n"));
        assert!(content.contains("onClick={handleSave}"));
        assert!(!content.contains("this."));
        assert!(content.ends_with("export default ProfileCard;\n"));
        assert!(text::is_balanced(content));
    }

    #[test]
    fn test_fetching_effect_is_replaced_by_hook() {
        let source = r#"
import React, { useState, useEffect } from 'react';

function StatsPanel() {
  const [stats, setStats] = useState([]);
  const [loading, setLoading] = useState(true);
  const [error, setError] = useState(null);

  useEffect(() => {
    fetch('/api/stats')
      .then((res) => res.json())
      .then((data) => { setStats(data); setLoading(false); })
      .catch(setError);
  }, []);

  return <ul>{stats.map((s) => <li key={s.id}>{s.value}</li>)}</ul>;
}
"#;
        let config = ConversionConfig { generate_state_container: false, ..ConversionConfig::default() };
        let files = ArtifactSynthesizer::new(config).generate(&analyze(source, None)).unwrap();
        let content = component(&files);

        assert!(content.contains("import { useStatsPanelData } from '../../../hooks/useStatsPanelData';"), "{content}");
        assert!(content.contains("  const query = useStatsPanelData();\n"));
        assert!(content.contains("  const stats = (query.data ?? []) as unknown[];\n"));
        assert!(content.contains("  const loading = query.isLoading;\n"));
        assert!(content.contains("  const error = query.error;\n"));
        assert!(content.contains("if (query.isLoading) {"));
        assert!(content.contains("return <div role=\"alert\">{query.error.message}</div>;"));
        assert!(!content.contains("useEffect"));
        assert!(!content.contains("useState"));
        assert!(text::is_balanced(content));
    }

    #[test]
    fn test_state_moves_to_store() {
        let source = r#"
function FilterBar() {
  const [query, setQuery] = useState('');
  const [sort, setSort] = useState('name');
  const [open, setOpen] = useState(false);
  return (
    <form>
      <input value={query} onChange={(e) => setQuery(e.target.value)} />
      <select value={sort} onChange={(e) => setSort(e.target.value)} />
      <button onClick={() => setOpen(!open)}>More</button>
    </form>
  );
}
"#;
        let files = ArtifactSynthesizer::default().generate(&analyze(source, None)).unwrap();
        let content = component(&files);

        assert!(content.contains("import { useFilterBarStore } from '../../../stores/filterBarStore';"), "{content}");
        assert!(content.contains("const { query, setQuery, sort, setSort, open, setOpen } = useFilterBarStore();"));
        assert!(!content.contains("useState"));
    }

    #[test]
    fn test_placeholder_markup() {
        let source = "const IconButton = ({ children }) => null;";
        let files = ArtifactSynthesizer::default().generate(&analyze(source, None)).unwrap();
        let content = component(&files);

        assert!(content.contains("import type { IconButtonProps } from './IconButton.types';"));
        assert!(content.contains("<div data-testid=\"icon-button\" className=\"inline-flex items-center gap-2\">"));
        assert!(content.contains("{children}"));
    }
}
