//! Origin to target idiom rewriting
//!
//! Import rewriting works on the extracted import bindings; code rewriting
//! works on ported statement and markup text.

use super::styles::remap_class_list;
use crate::analysis::{BindingKind, ComponentAnalysis};
use crate::text;
use regex::{Captures, Regex};
use regex_utils::rewrite as patterns;

/// Router v5 names and their v6 replacements; `None` drops the import.
const ROUTER_NAMES: &[(&str, Option<&str>)] = &[
    ("useHistory", Some("useNavigate")),
    ("withRouter", None),
    ("Switch", Some("Routes")),
    ("Redirect", Some("Navigate")),
];

const ROUTER_ORIGINS: &[&str] = &["react-router", "react-router-dom"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ImportEntry {
    origin: String,
    type_only: bool,
    default: Option<String>,
    namespace: Option<String>,
    named: Vec<String>,
}

/// Ordered, de-duplicated import declarations for one generated module.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    entries: Vec<ImportEntry>,
    side_effects: Vec<String>,
    assets: Vec<(String, String)>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, origin: &str, type_only: bool) -> &mut ImportEntry {
        let index = match self.entries.iter().position(|e| e.origin == origin && e.type_only == type_only) {
            Some(index) => index,
            None => {
                self.entries.push(ImportEntry { origin: origin.to_string(), type_only, ..Default::default() });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    pub fn add_default(&mut self, origin: &str, name: &str) -> &mut Self {
        self.entry(origin, false).default.get_or_insert_with(|| name.to_string());
        self
    }

    pub fn add_namespace(&mut self, origin: &str, name: &str) -> &mut Self {
        self.entry(origin, false).namespace.get_or_insert_with(|| name.to_string());
        self
    }

    pub fn add_named(&mut self, origin: &str, name: &str) -> &mut Self {
        let entry = self.entry(origin, false);
        if !entry.named.iter().any(|n| n == name) {
            entry.named.push(name.to_string());
        }
        self
    }

    pub fn add_type(&mut self, origin: &str, name: &str) -> &mut Self {
        let entry = self.entry(origin, true);
        if !entry.named.iter().any(|n| n == name) {
            entry.named.push(name.to_string());
        }
        self
    }

    pub fn add_side_effect(&mut self, origin: &str) -> &mut Self {
        if !self.side_effects.iter().any(|s| s == origin) {
            self.side_effects.push(origin.to_string());
        }
        self
    }

    /// An imported asset becomes a constant pointing into `public/assets`
    pub fn add_asset(&mut self, name: &str, origin: &str) -> &mut Self {
        let file = origin.rsplit('/').next().unwrap_or(origin);
        self.assets.push((name.to_string(), format!("/assets/{file}")));
        self
    }

    pub fn has_named(&self, origin: &str, name: &str) -> bool {
        self.entries.iter().any(|e| e.origin == origin && e.named.iter().any(|n| n == name))
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            let keyword = if entry.type_only { "import type" } else { "import" };
            let mut clause = Vec::new();
            if let Some(default) = &entry.default {
                clause.push(default.clone());
            }
            if let Some(namespace) = &entry.namespace {
                clause.push(format!("* as {namespace}"));
            }
            if !entry.named.is_empty() {
                clause.push(format!("{{ {} }}", entry.named.join(", ")));
            }
            if !clause.is_empty() {
                lines.push(format!("{keyword} {} from '{}';", clause.join(", "), entry.origin));
            }
        }
        lines.extend(self.side_effects.iter().map(|origin| format!("import '{origin}';")));
        lines
    }

    pub fn asset_constants(&self) -> Vec<String> {
        self.assets.iter().map(|(name, path)| format!("const {name} = '{path}';")).collect()
    }
}

/// Carry the origin imports over, translated through the idiom table.
///
/// `react` imports are skipped; templates rebuild them from what the
/// generated code uses. `axios` is dropped when requests go through a
/// generated service.
pub fn port_imports(analysis: &ComponentAnalysis, has_service: bool) -> ImportSet {
    let mut imports = ImportSet::new();
    for binding in &analysis.imports {
        let origin = binding.origin.as_str();
        if origin == "react" || origin == "prop-types" || (origin == "axios" && has_service) {
            continue;
        }

        if ROUTER_ORIGINS.contains(&origin) {
            let name = binding.name.as_str();
            let base = name.split(" as ").next().unwrap_or(name).trim();
            match ROUTER_NAMES.iter().find(|(from, _)| *from == base) {
                Some((_, Some(replacement))) => {
                    imports.add_named("react-router-dom", replacement);
                }
                Some((_, None)) => {}
                None => {
                    imports.add_named("react-router-dom", name);
                }
            }
            continue;
        }

        match binding.binding_kind {
            BindingKind::Default if patterns::ASSET_PATH.is_match(origin) => {
                imports.add_asset(&binding.name, origin);
            }
            BindingKind::Default => {
                imports.add_default(origin, &binding.name);
            }
            BindingKind::Named => {
                imports.add_named(origin, &binding.name);
            }
            BindingKind::Namespace => {
                imports.add_namespace(origin, &binding.name);
            }
            BindingKind::SideEffect => {
                imports.add_side_effect(origin);
            }
        }
    }
    imports
}

/// `this.setState({ a: 1, b })` becomes `setA(1)`, or a block for several keys.
fn port_set_state(code: &str, analysis: &ComponentAnalysis) -> String {
    patterns::SET_STATE_OBJECT
        .replace_all(code, |caps: &Captures| {
            let calls: Vec<String> = text::split_top_level(&caps[1], b',')
                .into_iter()
                .filter_map(|entry| {
                    let entry = entry.trim();
                    let (key, value) = match entry.split_once(':') {
                        Some((key, value)) => (key.trim(), value.trim()),
                        None => (entry, entry),
                    };
                    if !text::is_identifier(key) {
                        return None;
                    }
                    let setter = analysis
                        .state_bindings
                        .iter()
                        .find(|binding| binding.name == key)
                        .map(|binding| binding.setter_name())
                        .unwrap_or_else(|| format!("set{}", text::to_pascal_case(key)));
                    Some(format!("{setter}({value})"))
                })
                .collect();
            match calls.as_slice() {
                [] => String::new(),
                [single] => single.clone(),
                many => format!("{{ {}; }}", many.join("; ")),
            }
        })
        .into_owned()
}

fn remap_class_attributes(code: &str) -> String {
    patterns::CLASS_NAME_VALUE
        .replace_all(code, |caps: &Captures| match (caps.get(1), caps.get(2)) {
            (Some(double), _) => format!("className=\"{}\"", remap_class_list(double.as_str())),
            (None, Some(single)) => format!("className='{}'", remap_class_list(single.as_str())),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Rewrite statements, handlers and markup from the origin idiom.
///
/// Removes class-instance access and props/state destructuring (the
/// component signature and state hooks provide those names), ports router
/// calls to `navigate`, environment variables to `import.meta.env` and
/// relative asset paths to `/assets`, and remaps class names.
pub fn port_code(code: &str, analysis: &ComponentAnalysis) -> String {
    let mut out = patterns::HISTORY_DECL.replace_all(code, "").into_owned();
    out = patterns::BINDING_DESTRUCTURE.replace_all(&out, "").into_owned();
    out = patterns::THIS_PROPS.replace_all(&out, "").into_owned();
    out = port_set_state(&out, analysis);
    out = patterns::THIS_MEMBER.replace_all(&out, "").into_owned();

    if let Some(alias) = &analysis.props_alias {
        if let Ok(access) = Regex::new(&format!(r"\b{}\.", regex::escape(alias))) {
            out = access.replace_all(&out, "").into_owned();
        }
    }

    out = patterns::HISTORY_PUSH.replace_all(&out, "navigate(").into_owned();
    out = patterns::HISTORY_REPLACE.replace_all(&out, "navigate($1, { replace: true })").into_owned();
    out = patterns::HISTORY_BACK.replace_all(&out, "navigate(-1)").into_owned();

    out = patterns::ENV_PREFIX.replace_all(&out, "import.meta.env.VITE_").into_owned();
    out = patterns::NODE_ENV.replace_all(&out, "import.meta.env.MODE").into_owned();

    out = patterns::ASSET_REQUIRE.replace_all(&out, "'/assets/$1'").into_owned();
    out = patterns::ASSET_STRING.replace_all(&out, "${1}/assets/${2}${1}").into_owned();

    remap_class_attributes(&out)
}

/// Top-level statements of a block of code, trimmed, in order.
pub fn statements(code: &str) -> Vec<String> {
    let bytes = code.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b';' {
            i += 1;
            continue;
        }
        let end = text::statement_end(code, i).max(i + 1);
        let statement = text::dedent(&code[i..end]);
        if !statement.is_empty() {
            out.push(statement);
        }
        i = end;
    }
    out
}
