//! The built-in optimization passes, in application order

use super::deps::dependency_array;
use super::{OptimizationPass, PassError, PassResult};
use crate::synthesis::ArtifactKind;
use crate::text;
use regex::NoExpand;
use regex_utils::optimize as patterns;

/// Add `name` to the module's `react` value import, creating one if needed.
pub(crate) fn ensure_react_import(content: &str, name: &str) -> String {
    if let Some(caps) = patterns::REACT_NAMED_IMPORT.captures(content) {
        let mut names: Vec<&str> = caps[2].split(',').map(str::trim).filter(|n| !n.is_empty()).collect();
        if names.contains(&name) {
            return content.to_string();
        }
        names.push(name);
        names.sort_unstable();
        let default = caps.get(1).map_or("", |m| m.as_str());
        let line = format!("import {default}{{ {} }} from 'react';", names.join(", "));
        return patterns::REACT_NAMED_IMPORT.replace(content, NoExpand(&line)).into_owned();
    }
    if patterns::REACT_DEFAULT_IMPORT.is_match(content) {
        let line = format!("import React, {{ {name} }} from 'react';");
        return patterns::REACT_DEFAULT_IMPORT.replace(content, NoExpand(&line)).into_owned();
    }
    let import = format!("import {{ {name} }} from 'react';\n");
    if content.starts_with("import ") {
        format!("{import}{content}")
    } else {
        format!("{import}\n{content}")
    }
}

/// Byte range of the component body's top-level statements that run on
/// every render, before any early return.
fn hook_region(content: &str) -> Option<(usize, usize)> {
    let decl = patterns::COMPONENT_DECL.find(content)?;
    let start = decl.end();
    let end = patterns::BODY_EXIT.find_at(content, start).map_or(content.len(), |m| m.start());
    Some((start, end))
}

/// A `const <name> = <expr>;` declaration in the hook region
struct Declaration {
    /// Start of the initializer expression
    expr_start: usize,
    /// End of the statement, past its `;` when present
    end: usize,
}

impl Declaration {
    fn expr<'a>(&self, content: &'a str) -> &'a str {
        content[self.expr_start..self.end].trim_end().trim_end_matches(';').trim_end()
    }
}

fn declarations(content: &str, pattern: &regex::Regex) -> Vec<Declaration> {
    let Some((start, end)) = hook_region(content) else {
        return Vec::new();
    };
    pattern
        .find_iter(&content[start..end])
        .map(|m| {
            let expr_start = start + m.end();
            Declaration { expr_start, end: text::statement_end(content, expr_start) }
        })
        .collect()
}

/// Rewrite each selected declaration's initializer, back to front so
/// earlier offsets stay valid.
fn rewrite_declarations(
    content: &str,
    decls: Vec<Declaration>,
    wrap: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let mut out = content.to_string();
    let mut changed = false;
    for decl in decls.iter().rev() {
        let expr = decl.expr(content);
        if let Some(wrapped) = wrap(expr) {
            out.replace_range(decl.expr_start..decl.end, &format!("{wrapped};"));
            changed = true;
        }
    }
    changed.then_some(out)
}

fn is_wrappable_handler(expr: &str) -> bool {
    patterns::ARROW_HEAD.is_match(expr) && !patterns::JSX_TAG.is_match(expr)
}

fn is_derivation(expr: &str) -> bool {
    !expr.starts_with("use")
        && !patterns::ARROW_HEAD.is_match(expr)
        && !expr.contains("await ")
        && patterns::DERIVATION.is_match(expr)
        && !patterns::JSX_TAG.is_match(expr)
}

/// `export default Name;` becomes `export default memo(Name);`
pub struct MemoizeComponent;

impl OptimizationPass for MemoizeComponent {
    fn name(&self) -> &'static str {
        "memoize-component"
    }

    fn targets(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Component
    }

    fn is_applicable(&self, content: &str) -> bool {
        !content.contains("memo(") && patterns::EXPORT_DEFAULT_IDENT.is_match(content)
    }

    fn transform(&self, content: &str) -> PassResult {
        let wrapped = patterns::EXPORT_DEFAULT_IDENT.replace(content, "export default memo($1);");
        Ok(ensure_react_import(&wrapped, "memo"))
    }
}

/// Inline handlers declared in the component body get `useCallback`.
pub struct StableCallbacks;

impl OptimizationPass for StableCallbacks {
    fn name(&self) -> &'static str {
        "stable-callbacks"
    }

    fn targets(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Component
    }

    fn is_applicable(&self, content: &str) -> bool {
        declarations(content, &patterns::HANDLER_DECL)
            .iter()
            .any(|d| is_wrappable_handler(d.expr(content)))
    }

    fn transform(&self, content: &str) -> PassResult {
        let decls = declarations(content, &patterns::HANDLER_DECL);
        let out = rewrite_declarations(content, decls, |expr| {
            is_wrappable_handler(expr).then(|| format!("useCallback({expr}, {})", dependency_array(expr)))
        })
        .ok_or_else(|| PassError::AnchorNotFound("inline handler".to_string()))?;
        Ok(ensure_react_import(&out, "useCallback"))
    }
}

/// Collection derivations computed during render get `useMemo`.
pub struct MemoizeDerivedValues;

impl OptimizationPass for MemoizeDerivedValues {
    fn name(&self) -> &'static str {
        "memoize-derived-values"
    }

    fn targets(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Component
    }

    fn is_applicable(&self, content: &str) -> bool {
        declarations(content, &patterns::LOCAL_DECL).iter().any(|d| is_derivation(d.expr(content)))
    }

    fn transform(&self, content: &str) -> PassResult {
        let decls = declarations(content, &patterns::LOCAL_DECL);
        let out = rewrite_declarations(content, decls, |expr| {
            is_derivation(expr).then(|| format!("useMemo(() => {expr}, {})", dependency_array(expr)))
        })
        .ok_or_else(|| PassError::AnchorNotFound("derived value".to_string()))?;
        Ok(ensure_react_import(&out, "useMemo"))
    }
}

/// End of the JSX opening tag starting at `start`: the index of its `>`.
fn tag_end(content: &str, start: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0i32;
    let mut i = start;
    while i < bytes.len() {
        if let Some(next) = text::skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'>' if depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Media elements lacking a loading hint: `(insert_at, attribute)`
fn missing_media_hints(content: &str) -> Vec<(usize, &'static str)> {
    patterns::MEDIA_TAG
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = caps.get(1)?;
            let end = tag_end(content, whole.start())?;
            let element = &content[whole.start()..end];
            let (marker, attribute) = match tag.as_str() {
                "video" => ("preload=", " preload=\"metadata\""),
                _ => ("loading=", " loading=\"lazy\""),
            };
            (!element.contains(marker)).then_some((tag.end(), attribute))
        })
        .collect()
}

/// `<img>` and `<iframe>` get `loading="lazy"`, `<video>` gets `preload`.
pub struct LazyMedia;

impl OptimizationPass for LazyMedia {
    fn name(&self) -> &'static str {
        "lazy-media"
    }

    fn targets(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Component
    }

    fn is_applicable(&self, content: &str) -> bool {
        !missing_media_hints(content).is_empty()
    }

    fn transform(&self, content: &str) -> PassResult {
        let mut out = content.to_string();
        for (at, attribute) in missing_media_hints(content).into_iter().rev() {
            out.insert_str(at, attribute);
        }
        Ok(out)
    }
}

const REQUEST_SIGNATURE: &str = "private async request<T>(";
const JSON_RETURN: &str = "return (await response.json()) as T;";
const CACHE_FIELD: &str = "private readonly cache = new Map<string, unknown>();";

/// GET responses of a generated API client are cached per path.
pub struct ResponseCache;

impl ResponseCache {
    fn line_start(content: &str, at: usize) -> usize {
        content[..at].rfind('\n').map_or(0, |p| p + 1)
    }

    fn indentation(content: &str, at: usize) -> &str {
        let start = Self::line_start(content, at);
        let line = &content[start..];
        &line[..line.len() - line.trim_start().len()]
    }
}

impl OptimizationPass for ResponseCache {
    fn name(&self) -> &'static str {
        "response-cache"
    }

    fn targets(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Service
    }

    fn is_applicable(&self, content: &str) -> bool {
        content.contains(REQUEST_SIGNATURE) && content.contains(JSON_RETURN) && !content.contains(CACHE_FIELD)
    }

    fn transform(&self, content: &str) -> PassResult {
        let missing = |what: &str| PassError::AnchorNotFound(what.to_string());

        let request = content.find(REQUEST_SIGNATURE).ok_or_else(|| missing("request method"))?;
        let body_open = request + content[request..].find("{\n").ok_or_else(|| missing("request body"))?;
        let json_return = content.find(JSON_RETURN).ok_or_else(|| missing("response parsing"))?;
        let constructor = content.find("constructor(").ok_or_else(|| missing("constructor"))?;
        let constructor_end = constructor + content[constructor..].find('\n').ok_or_else(|| missing("constructor"))?;
        if !(constructor_end < request && body_open < json_return) {
            return Err(PassError::AnchorNotFound("request method layout".to_string()));
        }

        let member = Self::indentation(content, request).to_string();
        let body = format!("{member}  ");
        let at_return = Self::indentation(content, json_return).to_string();

        let mut out = String::with_capacity(content.len() + 512);
        let field_at = Self::line_start(content, constructor);
        out.push_str(&content[..field_at]);
        out.push_str(&format!("{member}{CACHE_FIELD}\n\n"));
        out.push_str(&content[field_at..=constructor_end]);
        out.push('\n');
        out.push_str(&format!("{member}clearCache(): void {{\n{body}this.cache.clear();\n{member}}}\n"));
        out.push_str(&content[constructor_end + 1..body_open + 2]);

        out.push_str(&format!("{body}const cacheable = (init?.method ?? 'GET').toUpperCase() === 'GET';\n"));
        out.push_str(&format!("{body}if (cacheable && this.cache.has(path)) {{\n"));
        out.push_str(&format!("{body}  return this.cache.get(path) as T;\n"));
        out.push_str(&format!("{body}}}\n"));

        out.push_str(&content[body_open + 2..json_return]);
        out.push_str("const data = (await response.json()) as T;\n");
        out.push_str(&format!("{at_return}if (cacheable) {{\n"));
        out.push_str(&format!("{at_return}  this.cache.set(path, data);\n"));
        out.push_str(&format!("{at_return}}}\n"));
        out.push_str(&format!("{at_return}return data;"));
        out.push_str(&content[json_return + JSON_RETURN.len()..]);
        Ok(out)
    }
}
