//! Heuristic extraction of component facts from source text

use super::{
    BindingKind, ComponentAnalysis, ComponentKind, EffectKind, EffectPrimitive, FeatureFlags,
    HandlerDecl, ImportBinding, NameSource, PropSpec, StateBinding, UNKNOWN_COMPONENT,
};
use crate::diagnostics::DiagnosticKind;
use crate::text;
use regex::Regex;
use regex_utils::component as patterns;
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::debug;

/// Props a router injects into wrapped components; navigation hooks replace them.
const ROUTER_PROPS: &[&str] = &["history", "location", "match"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Class,
    Function,
    Arrow,
    Wrapped,
}

#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    kind: DeclKind,
    start: usize,
    /// Where parsing of the callable (or class body) resumes
    resume: usize,
}

enum BodyShape {
    Block(Range<usize>),
    Expression(Range<usize>),
}

struct Callable {
    params: String,
    body: BodyShape,
    end: usize,
}

/// Region of the source that belongs to the component.
struct Scope {
    span: Range<usize>,
    params: Option<String>,
    body: Option<BodyShape>,
}

/// Extracts a [`ComponentAnalysis`] from component source using lexical
/// patterns. Never fails; problems surface as diagnostics on the result.
#[derive(Debug, Default, Clone)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, source: &str, declared_name: Option<&str>) -> ComponentAnalysis {
        let cleaned = text::strip_comments(source);
        let declared = declared_name.map(str::trim).filter(|n| !n.is_empty());

        let declaration = find_declaration(&cleaned, declared);
        let exported = find_export(&cleaned);

        let (name, name_source) = match (declared, &declaration, &exported) {
            (Some(name), _, _) => (name.to_string(), NameSource::Declared),
            (None, Some(decl), _) => (decl.name.clone(), NameSource::Declaration),
            (None, None, Some(name)) => (name.clone(), NameSource::Export),
            (None, None, None) => (UNKNOWN_COMPONENT.to_string(), NameSource::Fallback),
        };
        debug!("Resolved component name {} via {:?}", name, name_source);

        let mut analysis = ComponentAnalysis::new(name);
        analysis.name_source = name_source;

        if cleaned.trim().is_empty() || (declaration.is_none() && exported.is_none()) {
            analysis
                .diagnostics
                .record(DiagnosticKind::AnalysisError, "no component declaration found");
            return analysis;
        }
        if name_source == NameSource::Export {
            analysis.diagnostics.record(
                DiagnosticKind::AnalysisWarning,
                format!(
                    "component name '{}' taken from an export; no declaration found, confidence is low",
                    analysis.component_name
                ),
            );
        }
        if !text::is_balanced(&cleaned) {
            analysis.diagnostics.record(
                DiagnosticKind::AnalysisWarning,
                "source has unbalanced delimiters; extraction may be incomplete",
            );
        }

        analysis.imports = extract_imports(&cleaned);
        analysis.feature_flags = detect_flags(&cleaned);
        analysis.style_tokens = extract_style_tokens(&cleaned);
        analysis.endpoints = extract_endpoints(&cleaned);

        match declaration.as_ref().filter(|d| d.kind == DeclKind::Class) {
            Some(decl) => self.analyze_class(&cleaned, decl, &mut analysis),
            None => {
                let scope = declaration
                    .as_ref()
                    .and_then(|decl| functional_scope(&cleaned, decl))
                    .unwrap_or(Scope { span: 0..cleaned.len(), params: None, body: None });
                self.analyze_functional(&cleaned, &scope, &mut analysis);
            }
        }

        if analysis.render_markup.is_none() {
            analysis.diagnostics.record(
                DiagnosticKind::AnalysisWarning,
                "no render markup found; a placeholder will be generated",
            );
        }

        debug!(
            "Analyzed {}: {} props, {} state bindings, {} effects, complexity {:?}",
            analysis.component_name,
            analysis.props.len(),
            analysis.state_bindings.len(),
            analysis.effect_primitives.len(),
            analysis.complexity_class()
        );
        analysis
    }

    fn analyze_functional(&self, text: &str, scope: &Scope, analysis: &mut ComponentAnalysis) {
        analysis.component_kind = ComponentKind::Functional;
        let span_text = &text[scope.span.clone()];
        let body_range = match &scope.body {
            Some(BodyShape::Block(range)) => range.clone(),
            _ => scope.span.clone(),
        };
        let body_text = &text[body_range.clone()];

        // (prop, declaration hits)
        let mut props: Vec<(PropSpec, usize)> = Vec::new();
        if let Some(params) = &scope.params {
            let first = text::split_top_level(params, b',').first().map(|p| p.trim().to_string());
            match first {
                Some(param) if param.starts_with('{') => {
                    if let Some(close) = text::matching_close(&param, 0) {
                        for (name, default_expr) in parse_binding_entries(&param[1..close]) {
                            push_prop(&mut props, &name, default_expr, 1);
                        }
                    }
                }
                Some(param) => {
                    let alias = param.split(|c: char| c == ':' || c == '=').next().unwrap_or("").trim();
                    if text::is_identifier(alias) {
                        analysis.props_alias = Some(alias.to_string());
                    }
                }
                None => {}
            }
        }
        let alias = analysis.props_alias.clone().unwrap_or_else(|| "props".to_string());
        collect_alias_props(body_text, &alias, &mut props);

        let state = extract_hook_state(body_text);
        analysis.effect_primitives = extract_effect_hooks(body_text);

        match &scope.body {
            Some(BodyShape::Block(range)) => {
                let (markup, statements) = split_render(&text[range.clone()]);
                analysis.render_markup = markup;
                analysis.body_statements = statements;
            }
            Some(BodyShape::Expression(range)) => {
                analysis.render_markup = markup_from_expression(&text[range.clone()]);
            }
            None => {}
        }

        let hits = self.finish_props(text, props, analysis);
        analysis.state_bindings = state;
        report_unused(span_text, analysis, &hits);
    }

    fn analyze_class(&self, text: &str, decl: &Declaration, analysis: &mut ComponentAnalysis) {
        analysis.component_kind = ComponentKind::StatefulClass;
        let Some(open) = text[decl.resume..].find('{').map(|p| decl.resume + p) else {
            return;
        };
        let close = text::matching_close(text, open).unwrap_or(text.len());
        let class_body = &text[open + 1..close];
        let span_text = &text[decl.start..(close + 1).min(text.len())];

        if let Some(hook) = patterns::ANY_HOOK.captures(class_body) {
            analysis.diagnostics.record(
                DiagnosticKind::AnalysisError,
                format!("hook '{}' used inside class component {}", &hook[1], analysis.component_name),
            );
        }

        let mut props: Vec<(PropSpec, usize)> = Vec::new();
        collect_alias_props(class_body, "props", &mut props);

        let mut state = Vec::new();
        if let Some(m) = patterns::CLASS_STATE.find(class_body) {
            let brace = m.end() - 1;
            if let Some(end) = text::matching_close(class_body, brace) {
                for (name, initial) in parse_binding_entries(&class_body[brace + 1..end]) {
                    let initial_expr = initial.unwrap_or_else(|| "undefined".to_string());
                    state.push(StateBinding {
                        inferred_type: infer_literal_type(&initial_expr).to_string(),
                        name,
                        setter: None,
                        initial_expr,
                    });
                }
            }
        }

        for caps in patterns::LIFECYCLE.captures_iter(class_body) {
            let Some(m) = caps.get(0) else { continue };
            let kind = match &caps[1] {
                "componentDidMount" => EffectKind::Mount,
                "componentDidUpdate" => EffectKind::Update,
                _ => EffectKind::Unmount,
            };
            let brace = m.end() - 1;
            let body = text::matching_close(class_body, brace)
                .map(|end| text::dedent(&class_body[brace + 1..end]));
            analysis.effect_primitives.push(EffectPrimitive { kind, dependencies: Vec::new(), body });
        }

        analysis.handlers = extract_class_handlers(class_body);

        if let Some(m) = patterns::RENDER_METHOD.find(class_body) {
            let brace = m.end() - 1;
            if let Some(end) = text::matching_close(class_body, brace) {
                let (markup, statements) = split_render(&class_body[brace + 1..end]);
                analysis.render_markup = markup;
                analysis.body_statements = statements;
            }
        }

        let hits = self.finish_props(text, props, analysis);
        analysis.state_bindings = state;
        report_unused(span_text, analysis, &hits);
    }

    /// Merge PropTypes and defaultProps into the collected props, then
    /// resolve each prop's type and requiredness. Returns how often each
    /// prop name appears in its own declaration.
    fn finish_props(
        &self,
        text: &str,
        mut props: Vec<(PropSpec, usize)>,
        analysis: &mut ComponentAnalysis,
    ) -> Vec<usize> {
        let name = analysis.component_name.clone();
        let prop_types = block_entries(text, &patterns::PROP_TYPES, &name);
        let has_prop_types = !prop_types.is_empty();

        let mut declared_types: Vec<(String, String, bool)> = Vec::new();
        for entry in &prop_types {
            if let Some(caps) = patterns::PROP_TYPE_ENTRY.captures(entry) {
                let prop = caps[1].to_string();
                let ty = prop_type_to_ts(&caps[2]).to_string();
                let required = entry.contains(".isRequired");
                push_prop(&mut props, &prop, None, 0);
                declared_types.push((prop, ty, required));
            }
        }

        for entry in block_entries(text, &patterns::DEFAULT_PROPS, &name) {
            for (prop, default_expr) in parse_binding_entries(&entry) {
                push_prop(&mut props, &prop, default_expr, 0);
            }
        }

        if analysis.feature_flags.uses_navigation {
            props.retain(|(spec, _)| {
                !ROUTER_PROPS.contains(&spec.name.as_str())
                    || declared_types.iter().any(|(prop, _, _)| *prop == spec.name)
            });
        }

        let mut hits = Vec::with_capacity(props.len());
        analysis.props = props
            .into_iter()
            .map(|(mut spec, declaration_hits)| {
                hits.push(declaration_hits);
                let declared = declared_types.iter().find(|(prop, _, _)| *prop == spec.name);
                spec.inferred_type = match (declared, &spec.default_expr) {
                    (Some((_, ty, _)), _) => ty.clone(),
                    (None, Some(default_expr)) if infer_literal_type(default_expr) != "unknown" => {
                        infer_literal_type(default_expr).to_string()
                    }
                    _ => infer_from_name(&spec.name).to_string(),
                };
                spec.required = match declared {
                    Some((_, _, required)) => *required,
                    None if has_prop_types => false,
                    None => spec.default_expr.is_none(),
                };
                spec
            })
            .collect();
        hits
    }
}

fn find_declaration(text: &str, preferred: Option<&str>) -> Option<Declaration> {
    let sources: [(&Regex, DeclKind); 4] = [
        (&*patterns::CLASS_DECL, DeclKind::Class),
        (&*patterns::FUNCTION_DECL, DeclKind::Function),
        (&*patterns::ARROW_DECL, DeclKind::Arrow),
        (&*patterns::WRAPPED_DECL, DeclKind::Wrapped),
    ];
    let mut found = Vec::new();
    for (pattern, kind) in sources {
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else { continue };
            let resume = match kind {
                DeclKind::Class | DeclKind::Wrapped => whole.end(),
                DeclKind::Function => whole.start(),
                DeclKind::Arrow => {
                    // Past the assignment, where the arrow's parameters start
                    let assign = whole.as_str()[name.end() - whole.start()..].find('=').unwrap_or(0);
                    name.end() + assign + 1
                }
            };
            found.push(Declaration { name: name.as_str().to_string(), kind, start: whole.start(), resume });
        }
    }
    found.sort_by_key(|d| d.start);

    preferred
        .and_then(|name| found.iter().find(|d| d.name == name).cloned())
        .or_else(|| found.into_iter().next())
}

fn find_export(text: &str) -> Option<String> {
    if let Some(caps) = patterns::EXPORT_DEFAULT.captures(text) {
        return Some(caps[1].to_string());
    }
    let named: Vec<String> = patterns::EXPORT_NAMED.captures_iter(text).map(|c| c[1].to_string()).collect();
    named
        .iter()
        .find(|n| n.starts_with(|c: char| c.is_ascii_uppercase()))
        .or(named.first())
        .cloned()
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn starts_with_word(text: &str, at: usize, word: &str) -> bool {
    text[at..].starts_with(word)
        && text.as_bytes().get(at + word.len()).is_none_or(|&b| !text::is_ident_byte(b))
}

/// Parse a function expression, declaration or arrow starting at `from`.
fn parse_callable(text: &str, from: usize) -> Option<Callable> {
    let bytes = text.as_bytes();
    let mut i = skip_ws(bytes, from);
    for keyword in ["async", "function"] {
        if starts_with_word(text, i, keyword) {
            i = skip_ws(bytes, i + keyword.len());
        }
    }

    if bytes.get(i).is_some_and(|&b| text::is_ident_byte(b)) {
        let ident_end = i + bytes[i..].iter().take_while(|&&b| text::is_ident_byte(b)).count();
        let after = skip_ws(bytes, ident_end);
        if text[after..].starts_with("=>") {
            let params = text[i..ident_end].to_string();
            return Some(parse_body(text, skip_ws(bytes, after + 2), params));
        }
        // Named function expression
        i = after;
    }

    if bytes.get(i) != Some(&b'(') {
        return None;
    }
    let close = text::matching_close(text, i)?;
    let params = text[i + 1..close].to_string();
    let mut cursor = skip_ws(bytes, close + 1);
    // Return type annotation
    if bytes.get(cursor) == Some(&b':') {
        let arrow = text[cursor..].find("=>").map(|p| cursor + p);
        let brace = text[cursor..].find('{').map(|p| cursor + p);
        cursor = match (arrow, brace) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return None,
        };
    }
    if text[cursor..].starts_with("=>") {
        cursor = skip_ws(bytes, cursor + 2);
    }
    Some(parse_body(text, cursor, params))
}

fn parse_body(text: &str, at: usize, params: String) -> Callable {
    match text.as_bytes().get(at) {
        Some(b'{') => {
            let close = text::matching_close(text, at).unwrap_or(text.len());
            Callable { params, body: BodyShape::Block(at + 1..close), end: (close + 1).min(text.len()) }
        }
        Some(b'(') => {
            let close = text::matching_close(text, at).unwrap_or(text.len());
            Callable { params, body: BodyShape::Expression(at + 1..close), end: (close + 1).min(text.len()) }
        }
        _ => {
            let end = text::statement_end(text, at);
            let expr_end = if text[..end].ends_with(';') { end - 1 } else { end };
            Callable { params, body: BodyShape::Expression(at..expr_end), end }
        }
    }
}

fn functional_scope(text: &str, decl: &Declaration) -> Option<Scope> {
    let callable = parse_callable(text, decl.resume)?;
    Some(Scope { span: decl.start..callable.end, params: Some(callable.params), body: Some(callable.body) })
}

fn extract_imports(text: &str) -> Vec<ImportBinding> {
    let mut imports = Vec::new();
    for caps in patterns::IMPORT.captures_iter(text) {
        let origin = caps[2].to_string();
        let Some(clause) = caps.get(1).map(|c| c.as_str().trim()) else {
            imports.push(ImportBinding { name: origin.clone(), origin, binding_kind: BindingKind::SideEffect });
            continue;
        };

        let (head, named) = match clause.find('{') {
            Some(open) => {
                let close = clause.rfind('}').unwrap_or(clause.len());
                (&clause[..open], Some(&clause[open + 1..close.max(open + 1)]))
            }
            None => (clause, None),
        };
        for part in head.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(ns) = part.strip_prefix("* as ") {
                imports.push(ImportBinding {
                    name: ns.trim().to_string(),
                    origin: origin.clone(),
                    binding_kind: BindingKind::Namespace,
                });
            } else {
                imports.push(ImportBinding {
                    name: part.to_string(),
                    origin: origin.clone(),
                    binding_kind: BindingKind::Default,
                });
            }
        }
        for part in named.into_iter().flat_map(|n| n.split(',')).map(str::trim).filter(|p| !p.is_empty()) {
            imports.push(ImportBinding {
                name: part.to_string(),
                origin: origin.clone(),
                binding_kind: BindingKind::Named,
            });
        }
    }
    imports
}

fn detect_flags(text: &str) -> FeatureFlags {
    FeatureFlags {
        uses_navigation: patterns::NAVIGATION.is_match(text),
        uses_media: patterns::MEDIA.is_match(text),
        uses_animation: patterns::ANIMATION.is_match(text),
        uses_remote_data: patterns::REMOTE_DATA.is_match(text),
    }
}

fn extract_style_tokens(text: &str) -> BTreeSet<String> {
    patterns::CLASS_NAME
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or(caps.get(2)).or(caps.get(3)))
        .flat_map(|m| m.as_str().split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

fn extract_endpoints(text: &str) -> Vec<String> {
    let mut endpoints: Vec<String> = Vec::new();
    for caps in patterns::FETCH_URL.captures_iter(text) {
        let url = caps[1].to_string();
        if !endpoints.contains(&url) {
            endpoints.push(url);
        }
    }
    endpoints
}

/// Entries of an object pattern or literal: `a`, `b = 1`, `c: 2`, `d: e = 3`.
/// Returns each key with its default or value expression.
fn parse_binding_entries(inner: &str) -> Vec<(String, Option<String>)> {
    let mut entries = Vec::new();
    for entry in text::split_top_level(inner, b',') {
        let entry = entry.trim();
        if entry.starts_with("...") {
            continue;
        }
        let colon = text::split_top_level(entry, b':');
        let equals = text::split_top_level(entry, b'=');
        let (key, value) = match (colon.len() > 1, equals.len() > 1) {
            (true, _) if colon[0].len() < equals[0].len() => {
                (colon[0].trim(), Some(entry[colon[0].len() + 1..].trim()))
            }
            (_, true) => (equals[0].trim(), Some(entry[equals[0].len() + 1..].trim())),
            _ => (entry, None),
        };
        // In a pattern `d: e = 3` the value after the colon is a rename with a default
        let value = value.map(|v| match text::split_top_level(v, b'=').as_slice() {
            [alias, rest @ ..] if text::is_identifier(alias.trim()) && !rest.is_empty() && !v.contains("=>") => {
                v[alias.len() + 1..].trim().to_string()
            }
            _ => v.to_string(),
        });
        let key = key.trim_matches(|c| c == '\'' || c == '"');
        if text::is_identifier(key) {
            entries.push((key.to_string(), value));
        }
    }
    entries
}

fn push_prop(props: &mut Vec<(PropSpec, usize)>, name: &str, default_expr: Option<String>, hits: usize) {
    match props.iter_mut().find(|(p, _)| p.name == name) {
        Some((existing, existing_hits)) => {
            if existing.default_expr.is_none() {
                existing.default_expr = default_expr;
            }
            *existing_hits = (*existing_hits).max(hits);
        }
        None => props.push((
            PropSpec {
                name: name.to_string(),
                inferred_type: "unknown".to_string(),
                required: true,
                default_expr,
            },
            hits,
        )),
    }
}

/// Props reached through the props object: `alias.x` and `const { x } = alias`.
fn collect_alias_props(body: &str, alias: &str, props: &mut Vec<(PropSpec, usize)>) {
    let custom;
    let (access, destructure): (&Regex, &Regex) = if alias == "props" {
        (&patterns::PROPS_ACCESS, &patterns::PROPS_DESTRUCTURE)
    } else {
        let escaped = regex::escape(alias);
        let access = Regex::new(&format!(r"\b{escaped}\.([A-Za-z_$][\w$]*)"));
        let destructure = Regex::new(&format!(r"\b(?:const|let)\s*\{{([^{{}}]*)\}}\s*=\s*{escaped}\b"));
        custom = match (access, destructure) {
            (Ok(a), Ok(d)) => (a, d),
            _ => return,
        };
        (&custom.0, &custom.1)
    };

    for caps in destructure.captures_iter(body) {
        for (name, default_expr) in parse_binding_entries(&caps[1]) {
            push_prop(props, &name, default_expr, 1);
        }
    }
    for caps in access.captures_iter(body) {
        push_prop(props, &caps[1], None, 0);
    }
}

fn extract_hook_state(body: &str) -> Vec<StateBinding> {
    let mut state = Vec::new();
    for caps in patterns::USE_STATE.captures_iter(body) {
        let Some(m) = caps.get(0) else { continue };
        let initial_expr = first_argument(body, m.end() - 1).unwrap_or_else(|| "undefined".to_string());
        state.push(StateBinding {
            name: caps[1].to_string(),
            setter: caps.get(2).map(|s| s.as_str().to_string()),
            inferred_type: infer_literal_type(&initial_expr).to_string(),
            initial_expr,
        });
    }
    for caps in patterns::USE_REDUCER.captures_iter(body) {
        let Some(m) = caps.get(0) else { continue };
        let open = m.end() - 1;
        let initial_expr = text::matching_close(body, open)
            .and_then(|close| {
                text::split_top_level(&body[open + 1..close], b',').get(1).map(|a| a.trim().to_string())
            })
            .unwrap_or_else(|| "undefined".to_string());
        state.push(StateBinding {
            name: caps[1].to_string(),
            setter: Some(caps[2].to_string()),
            inferred_type: infer_literal_type(&initial_expr).to_string(),
            initial_expr,
        });
    }
    state
}

fn first_argument(text: &str, open: usize) -> Option<String> {
    let close = text::matching_close(text, open)?;
    text::split_top_level(&text[open + 1..close], b',').first().map(|a| a.trim().to_string())
}

fn extract_effect_hooks(body: &str) -> Vec<EffectPrimitive> {
    let mut effects = Vec::new();
    for caps in patterns::EFFECT_HOOK.captures_iter(body) {
        let Some(m) = caps.get(0) else { continue };
        let kind = match &caps[1] {
            "useEffect" => EffectKind::Effect,
            "useLayoutEffect" => EffectKind::LayoutEffect,
            "useMemo" => EffectKind::Memo,
            _ => EffectKind::Callback,
        };
        let open = m.end() - 1;
        let Some(close) = text::matching_close(body, open) else {
            effects.push(EffectPrimitive { kind, dependencies: Vec::new(), body: None });
            continue;
        };
        let args = text::split_top_level(&body[open + 1..close], b',');
        let dependencies = match args.as_slice() {
            [_, .., last] if last.trim().starts_with('[') => {
                let list = last.trim();
                let list = list.strip_prefix('[').unwrap_or(list);
                list.strip_suffix(']')
                    .unwrap_or(list)
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            _ => Vec::new(),
        };
        effects.push(EffectPrimitive {
            kind,
            dependencies,
            body: args.first().map(|a| a.trim().to_string()),
        });
    }
    effects
}

fn extract_class_handlers(class_body: &str) -> Vec<HandlerDecl> {
    let mut handlers = Vec::new();
    for caps in patterns::CLASS_ARROW_HANDLER.captures_iter(class_body) {
        let Some(name) = caps.get(1) else { continue };
        let line_start = class_body[..name.start()].rfind('\n').map_or(0, |p| p + 1);
        let end = text::statement_end(class_body, name.start());
        let statement = text::dedent(&class_body[line_start..end]);
        handlers.push(HandlerDecl {
            name: name.as_str().to_string(),
            source: format!("const {};", statement.trim_end_matches(';')),
        });
    }
    for caps in patterns::CLASS_METHOD_HANDLER.captures_iter(class_body) {
        let Some(m) = caps.get(0) else { continue };
        let name = caps[2].to_string();
        if handlers.iter().any(|h| h.name == name) {
            continue;
        }
        let brace = m.end() - 1;
        let Some(close) = text::matching_close(class_body, brace) else { continue };
        let asyncness = if caps.get(1).is_some() { "async " } else { "" };
        let body = text::indent(&text::dedent(&class_body[brace + 1..close]), 2);
        handlers.push(HandlerDecl {
            source: format!("const {name} = {asyncness}({}) => {{\n{body}\n}};", caps[3].trim()),
            name,
        });
    }
    handlers
}

/// Split a function body into its final top-level `return` markup and the
/// statements before it.
fn split_render(body: &str) -> (Option<String>, Option<String>) {
    let Some(&ret) = text::top_level_keyword_positions(body, "return").last() else {
        let statements = text::dedent(body);
        return (None, (!statements.is_empty()).then_some(statements));
    };
    let bytes = body.as_bytes();
    let value_start = skip_ws(bytes, ret + "return".len());
    let (markup, end) = match bytes.get(value_start) {
        Some(b'(') => match text::matching_close(body, value_start) {
            Some(close) => {
                let end = text::statement_end(body, close + 1);
                (markup_from_expression(&body[value_start + 1..close]), end)
            }
            None => (None, body.len()),
        },
        _ => {
            let end = text::statement_end(body, value_start);
            (markup_from_expression(body[value_start..end].trim_end_matches(';')), end)
        }
    };
    let rest = format!("{}{}", &body[..ret], &body[end.min(body.len())..]);
    let statements = text::dedent(&rest);
    (markup, (!statements.is_empty()).then_some(statements))
}

fn markup_from_expression(expr: &str) -> Option<String> {
    let trimmed = expr.trim();
    if trimmed.starts_with('<') {
        Some(text::dedent(expr))
    } else {
        None
    }
}

/// Object-literal entries of `<Name>.propTypes = {...}` style blocks.
fn block_entries(text: &str, pattern: &Regex, component_name: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if caps.get(1).is_some_and(|owner| owner.as_str() != component_name) {
            continue;
        }
        let brace = m.end() - 1;
        if let Some(close) = text::matching_close(text, brace) {
            entries.extend(text::split_top_level(&text[brace + 1..close], b',').into_iter().map(str::to_string));
        }
    }
    entries
}

fn prop_type_to_ts(prop_type: &str) -> &'static str {
    match prop_type {
        "string" | "oneOf" => "string",
        "number" => "number",
        "bool" => "boolean",
        "func" => "() => void",
        "array" | "arrayOf" => "unknown[]",
        "object" | "shape" | "objectOf" | "exact" => "Record<string, unknown>",
        "node" => "ReactNode",
        "element" => "ReactElement",
        "symbol" => "symbol",
        _ => "unknown",
    }
}

/// TypeScript type of a literal initializer, `unknown` when not obvious.
pub(crate) fn infer_literal_type(expr: &str) -> &'static str {
    let expr = expr.trim();
    match expr {
        "true" | "false" => return "boolean",
        "" | "null" | "undefined" => return "unknown",
        _ => {}
    }
    if expr.starts_with(['\'', '"', '`']) {
        "string"
    } else if expr.parse::<f64>().is_ok() || expr.strip_prefix('-').is_some_and(|n| n.parse::<f64>().is_ok()) {
        "number"
    } else if expr.starts_with('[') {
        "unknown[]"
    } else if expr.starts_with('{') {
        "Record<string, unknown>"
    } else if expr.starts_with("new Date(") {
        "Date"
    } else if expr.starts_with("() =>") && expr.ends_with("{}") {
        "() => void"
    } else {
        "unknown"
    }
}

fn infer_from_name(name: &str) -> &'static str {
    let prefixed = |prefix: &str| {
        name.strip_prefix(prefix).is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    };
    if prefixed("on") {
        "() => void"
    } else if ["is", "has", "show", "can", "should"].iter().any(|p| prefixed(p)) {
        "boolean"
    } else if name == "children" {
        "ReactNode"
    } else if name == "className" {
        "string"
    } else {
        "unknown"
    }
}

/// Warn about props and state that are declared but never read.
///
/// PropTypes and defaultProps blocks are blanked first so a static
/// declaration inside a class does not count as a use.
fn report_unused(span_text: &str, analysis: &mut ComponentAnalysis, prop_hits: &[usize]) {
    let usage = blank_static_blocks(span_text);
    let unused_props: Vec<String> = analysis
        .props
        .iter()
        .zip(prop_hits)
        .filter(|(prop, hits)| text::count_word(&usage, &prop.name) <= **hits)
        .map(|(prop, _)| prop.name.clone())
        .collect();
    let unused_state: Vec<String> = analysis
        .state_bindings
        .iter()
        .filter(|state| text::count_word(&usage, &state.name) <= 1)
        .map(|state| state.name.clone())
        .collect();

    for name in unused_props {
        analysis
            .diagnostics
            .record(DiagnosticKind::AnalysisWarning, format!("prop '{name}' is declared but never used"));
    }
    for name in unused_state {
        analysis
            .diagnostics
            .record(DiagnosticKind::AnalysisWarning, format!("state '{name}' is declared but never used"));
    }
}

fn blank_static_blocks(text: &str) -> String {
    let mut out = text.to_string();
    for pattern in [&*patterns::PROP_TYPES, &*patterns::DEFAULT_PROPS] {
        for m in pattern.find_iter(text) {
            let brace = m.end() - 1;
            if let Some(close) = text::matching_close(text, brace) {
                out.replace_range(m.start()..=close, &" ".repeat(close + 1 - m.start()));
            }
        }
    }
    out
}
